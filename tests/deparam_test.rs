use paramtree::{coerce, decode_component, deparam, Deparam, DeparamOptions, ParamError, ParamValue};

fn s(v: &str) -> ParamValue {
    ParamValue::from(v)
}

fn n(v: f64) -> ParamValue {
    ParamValue::Number(v)
}

#[test_log::test]
fn test_repeated_key_becomes_array() {
    let tree = deparam("a=1&a=2", false).unwrap();
    assert_eq!(tree["a"], ParamValue::Array(vec![s("1"), s("2")]));

    let tree = deparam("a=1&a=2", true).unwrap();
    assert_eq!(tree["a"], ParamValue::Array(vec![n(1.0), n(2.0)]));
}

#[test_log::test]
fn test_nested_object_keys() {
    let tree = deparam("a[b]=1&a[c]=2", false).unwrap();
    let a = tree["a"].as_object().unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a["b"], s("1"));
    assert_eq!(a["c"], s("2"));
}

#[test]
fn test_append_marker_builds_array() {
    let tree = deparam("a[]=1&a[]=2", false).unwrap();
    assert_eq!(tree["a"], ParamValue::Array(vec![s("1"), s("2")]));
}

#[test]
fn test_explicit_indices_build_array() {
    let tree = deparam("a[0]=x&a[1]=y", false).unwrap();
    assert_eq!(tree["a"], ParamValue::Array(vec![s("x"), s("y")]));
}

#[test]
fn test_empty_input() {
    assert!(deparam("", false).unwrap().is_empty());
    assert!(deparam("", true).unwrap().is_empty());
}

#[test]
fn test_bare_key() {
    let tree = deparam("flag", false).unwrap();
    assert_eq!(tree["flag"], s(""));

    let tree = deparam("flag", true).unwrap();
    assert_eq!(tree["flag"], ParamValue::Undefined);
}

#[test]
fn test_deeply_nested_mixed_containers() {
    let tree = deparam(
        "user[name]=Ada&user[langs][]=en&user[langs][]=fr&user[jobs][0][title]=eng&user[jobs][1][title]=lead",
        false,
    )
    .unwrap();

    let user = &tree["user"];
    assert_eq!(user.get("name"), Some(&s("Ada")));
    assert_eq!(
        user.get("langs"),
        Some(&ParamValue::Array(vec![s("en"), s("fr")]))
    );

    let jobs = user.get("jobs").and_then(ParamValue::as_array).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].get("title"), Some(&s("lead")));
}

#[test]
fn test_top_level_order_preserved() {
    let tree = deparam("z=1&a=2&m[x]=3&a=4", false).unwrap();
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_encoded_names_and_values() {
    let tree = deparam("a%5Bb%5D=hello+world&caf%C3%A9=%E2%9C%93", false).unwrap();
    assert_eq!(tree["a"].get("b"), Some(&s("hello world")));
    assert_eq!(tree["café"], s("✓"));
}

#[test]
fn test_coercion_types() {
    let tree = deparam(
        "i=42&f=-1.5&t=true&fl=false&nu=null&un=undefined&str=12abc&empty=",
        true,
    )
    .unwrap();

    assert_eq!(tree["i"], n(42.0));
    assert_eq!(tree["f"], n(-1.5));
    assert_eq!(tree["t"], ParamValue::Bool(true));
    assert_eq!(tree["fl"], ParamValue::Bool(false));
    assert_eq!(tree["nu"], ParamValue::Null);
    assert_eq!(tree["un"], ParamValue::Undefined);
    assert_eq!(tree["str"], s("12abc"));
    assert_eq!(tree["empty"], s(""));
}

#[test]
fn test_coercion_matches_coercer_on_every_leaf() {
    let input = "a=1&b=2.50&c=true&d[x]=007&d[y]=text&e[]=null&e[]=1e2";
    let plain = deparam(input, false).unwrap();
    let coerced = deparam(input, true).unwrap();

    fn check(plain: &ParamValue, coerced: &ParamValue) {
        match (plain, coerced) {
            (ParamValue::String(raw), value) => assert_eq!(&coerce(raw), value),
            (ParamValue::Array(a), ParamValue::Array(b)) => {
                assert_eq!(a.len(), b.len());
                a.iter().zip(b).for_each(|(x, y)| check(x, y));
            }
            (ParamValue::Object(a), ParamValue::Object(b)) => {
                assert_eq!(a.len(), b.len());
                for (key, x) in a {
                    check(x, &b[key]);
                }
            }
            other => panic!("Shape mismatch: {other:?}"),
        }
    }

    for (key, value) in &plain {
        check(value, &coerced[key]);
    }
}

#[test]
fn test_decode_fault_propagates() {
    match deparam("ok=1&bad=%zz", false) {
        Err(ParamError::MalformedEscape { token, position }) => {
            assert_eq!(token, "%zz");
            assert_eq!(position, 0);
        }
        other => panic!("Expected malformed escape, got: {other:?}"),
    }

    let err = deparam("a%E0=1", true).unwrap_err();
    assert!(err.is_decode_fault());
    assert!(decode_component("%").is_err());
}

#[test]
fn test_inconsistent_paths_are_accepted() {
    // Not validated; just must not fail
    for input in ["a[0]=1&a[x]=2", "a[x]=1&a[0]=2", "a=1&a[b]=2&a=3", "a[b=1", "a]]=1", "[]=1", "a[][][]=1"] {
        assert!(deparam(input, false).is_ok(), "input {input:?}");
        assert!(deparam(input, true).is_ok(), "input {input:?}");
    }
}

#[test]
fn test_parser_is_reusable() {
    let parser = Deparam::new(DeparamOptions::new().with_coerce(true));
    let first = parser.parse("a=1").unwrap();
    let second = parser.parse("b=2").unwrap();

    assert!(first.get("b").is_none());
    assert!(second.get("a").is_none());
    assert!(parser.options().coerce);
}
