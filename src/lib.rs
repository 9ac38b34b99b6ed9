pub mod coerce;
pub mod decode;
pub mod deparam;
pub mod error;
pub mod key_path;
pub mod param;
pub mod url;
pub mod value;

pub use coerce::coerce;
pub use decode::{decode_component, encode_component};
pub use deparam::{deparam, Deparam, DeparamOptions};
pub use error::ParamError;
pub use key_path::{KeyPath, Segment};
pub use param::param;
pub use url::{
    build_fragment, build_querystring, deparam_fragment, deparam_querystring, Fragment,
    MergeMode, ParamConfig, ParamSource, Params, QueryString,
};
pub use value::{ParamMap, ParamValue};

pub type Result<T> = std::result::Result<T, ParamError>;
