use std::collections::{BTreeMap, HashMap};

use pretty_assertions::assert_eq;
use serde::Deserialize;
use shape_qs::{Config, Error, ListDecoding, MapDecoding, Shape};

#[derive(Debug, PartialEq, Deserialize)]
struct Address {
    city: String,
    postcode: String,
}

#[derive(Debug, PartialEq, Deserialize)]
struct QueryParams {
    id: u8,
    name: String,
    address: Address,
    phone: u32,
    user_ids: Vec<u8>,
}

#[test]
fn deserialize_struct() {
    let params = QueryParams {
        id: 42,
        name: "Acme".to_string(),
        phone: 12345,
        address: Address {
            city: "Carrot City".to_string(),
            postcode: "12345".to_string(),
        },
        user_ids: vec![1, 2, 3, 4],
    };
    let rec_params: QueryParams = shape_qs::from_str(
        "name=Acme&id=42&phone=12345&address.postcode=12345&\
         address.city=Carrot%20City&user_ids.0=1&user_ids.1=2&\
         user_ids.2=3&user_ids.3=4",
    )
    .unwrap();
    assert_eq!(rec_params, params);
}

#[test]
fn deserialize_pairs() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Request {
        action: String,
        map: HashMap<String, String>,
    }

    let request: Request = shape_qs::from_pairs([
        ("action", Some("myAction")),
        ("map.id1", Some("value1")),
        ("map.id2", Some("value2")),
    ])
    .unwrap();
    assert_eq!(request.action, "myAction");
    assert_eq!(
        request.map,
        HashMap::from([
            ("id1".to_owned(), "value1".to_owned()),
            ("id2".to_owned(), "value2".to_owned())
        ])
    );
}

#[test]
fn deserialize_name_value_map() {
    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Request {
        attributes: BTreeMap<String, u32>,
    }

    let config = Config::new().map_decoding(MapDecoding::name_value_pairs());
    let request: Request = config
        .deserialize_str(
            "Attributes.1.Name=retries&Attributes.1.Value=3&\
             Attributes.2.Name=timeout&Attributes.2.Value=30",
        )
        .unwrap();
    assert_eq!(
        request.attributes,
        BTreeMap::from([("retries".to_owned(), 3), ("timeout".to_owned(), 30)])
    );
}

#[test]
fn deserialize_indexed_lists() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Filter {
        name: String,
        values: Vec<String>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Request {
        filters: Vec<Filter>,
    }

    let config = Config::new().list_decoding(ListDecoding::Indexed);
    let request: Request = config
        .deserialize_pairs([
            ("filters.2.name", Some("state")),
            ("filters.2.values.1", Some("running")),
            ("filters.1.name", Some("tag")),
            ("filters.1.values.1", Some("a")),
            ("filters.1.values.2", Some("b")),
        ])
        .unwrap();
    assert_eq!(
        request,
        Request {
            filters: vec![
                Filter {
                    name: "tag".to_owned(),
                    values: vec!["a".to_owned(), "b".to_owned()],
                },
                Filter {
                    name: "state".to_owned(),
                    values: vec!["running".to_owned()],
                },
            ]
        }
    );
}

#[test]
fn null_is_present_but_empty() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        flag: Option<String>,
        name: String,
        tags: Vec<String>,
        #[serde(default)]
        missing: Option<String>,
    }

    let query: Query = shape_qs::from_str("flag&name&tags").unwrap();
    assert_eq!(
        query,
        Query {
            flag: None,
            name: String::new(),
            tags: vec![],
            missing: None,
        }
    );
}

#[test]
fn missing_key_is_an_error() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Query {
        name: String,
        id: u32,
    }

    let err = shape_qs::from_str::<Query>("name=x").unwrap_err();
    assert!(matches!(err, Error::Custom(_)), "got: {err}");
    assert!(err.to_string().contains("missing field `id`"), "got: {err}");
}

#[test]
fn single_value_as_sequence() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        ids: Vec<u32>,
    }

    let query: Query = shape_qs::from_str("ids=7").unwrap();
    assert_eq!(query, Query { ids: vec![7] });
}

#[test]
fn sequence_with_non_numeric_keys() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Query {
        ids: Vec<u32>,
    }

    let err = shape_qs::from_str::<Query>("ids.a=1").unwrap_err();
    assert!(err.to_string().contains("non-numeric key `a`"), "got: {err}");
}

#[test]
fn deserialize_primitives() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Primitives {
        bool_val: bool,
        i64_val: i64,
        u8_val: u8,
        f64_val: f64,
        char_val: char,
        unit_val: (),
    }

    let parsed: Primitives = shape_qs::from_str(
        "bool_val=true&i64_val=-9223372036854775808&u8_val=255&f64_val=2.5&\
         char_val=%F0%9F%A6%80&unit_val",
    )
    .unwrap();
    assert_eq!(
        parsed,
        Primitives {
            bool_val: true,
            i64_val: i64::MIN,
            u8_val: 255,
            f64_val: 2.5,
            char_val: '🦀',
            unit_val: (),
        }
    );

    let err = shape_qs::from_str::<Primitives>("bool_val=yes").unwrap_err();
    assert!(err.to_string().contains("invalid type"), "got: {err}");
}

#[test]
fn deserialize_enums() {
    #[derive(Debug, PartialEq, Deserialize)]
    enum Colour {
        Red,
        Blue,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    enum Geometry {
        Circle { radius: u32 },
        Square(u32),
        Empty,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        colour: Colour,
        shape: Geometry,
        other: Geometry,
        last: Geometry,
    }

    let query: Query = shape_qs::from_str(
        "colour=Blue&shape.Circle.radius=2&other.Square=4&last=Empty",
    )
    .unwrap();
    assert_eq!(
        query,
        Query {
            colour: Colour::Blue,
            shape: Geometry::Circle { radius: 2 },
            other: Geometry::Square(4),
            last: Geometry::Empty,
        }
    );
    assert_ne!(query.colour, Colour::Red);
}

#[test]
fn numeric_map_keys() {
    let map: HashMap<u32, String> = shape_qs::from_str("1=one&20=twenty").unwrap();
    assert_eq!(
        map,
        HashMap::from([(1, "one".to_owned()), (20, "twenty".to_owned())])
    );
}

#[test]
fn from_shape_directly() {
    let shape: Shape = [("x", Shape::from("1")), ("y", Shape::List(vec!["2".into(), "3".into()]))]
        .into_iter()
        .collect();

    #[derive(Debug, PartialEq, Deserialize)]
    struct Point {
        x: i32,
        y: Vec<i32>,
    }

    let point: Point = shape_qs::from_shape(shape).unwrap();
    assert_eq!(point, Point { x: 1, y: vec![2, 3] });
}

#[test]
fn parse_errors_propagate() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Query {
        a: String,
    }

    let err = shape_qs::from_str::<Query>("a=1&a.b=2").unwrap_err();
    assert!(matches!(err, Error::ConflictingPath(_)), "got: {err}");

    let err = shape_qs::from_str::<Query>("a=%").unwrap_err();
    assert!(matches!(err, Error::MalformedEncoding { .. }), "got: {err}");
}
