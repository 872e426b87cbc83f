//! Turns the raw query string of a data route into a validated intent.
//!
//! Parameters are counted by distinct key; when a key is repeated the first
//! value wins.

use std::collections::HashMap;

use crate::errors::ApiError;

/// Id that addresses the whole collection on read and delete.
pub const ALL_RECORDS_ID: i64 = -1;

/// Which records a read or delete applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Id(i64),
    Name(String),
}

/// `PUT /create-data`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntent {
    pub name: String,
    pub value: String,
}

/// `POST /update-data`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIntent {
    pub name: String,
    pub value: String,
}

struct Params(HashMap<String, String>);

impl Params {
    fn new(pairs: Vec<(String, String)>) -> Self {
        let mut map = HashMap::with_capacity(pairs.len());
        for (k, v) in pairs {
            map.entry(k).or_insert(v);
        }
        Self(map)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn name(&self) -> Result<String, ApiError> {
        match self.get("name") {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            Some(_) => Err(ApiError::BadRequest("name must not be empty".into())),
            None => Err(ApiError::BadRequest("name is required".into())),
        }
    }
}

/// `name` is mandatory and `value` is the only other key allowed.
pub fn parse_create(pairs: Vec<(String, String)>) -> Result<CreateIntent, ApiError> {
    let params = Params::new(pairs);

    match params.len() {
        1 | 2 => {}
        n => {
            return Err(ApiError::BadRequest(format!(
                "expected name and optional value, got {n} parameters"
            )))
        }
    }

    let name = params.name()?;
    if params.len() == 2 && params.get("value").is_none() {
        return Err(ApiError::BadRequest(
            "the only parameter allowed besides name is value".into(),
        ));
    }

    Ok(CreateIntent {
        name,
        value: params.get("value").unwrap_or_default().to_string(),
    })
}

/// Exactly one of `id` or `name`. `id=-1` selects every record.
pub fn parse_selector(pairs: Vec<(String, String)>) -> Result<Selector, ApiError> {
    let params = Params::new(pairs);

    if params.len() != 1 {
        return Err(ApiError::BadRequest(
            "exactly one of id or name is required".into(),
        ));
    }

    if let Some(raw) = params.get("id") {
        let id: i64 = raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("id {raw:?} is not an integer")))?;
        return Ok(if id == ALL_RECORDS_ID {
            Selector::All
        } else {
            Selector::Id(id)
        });
    }

    if params.get("name").is_some() {
        return params.name().map(Selector::Name);
    }

    Err(ApiError::BadRequest(
        "exactly one of id or name is required".into(),
    ))
}

/// `name` is required, a missing `value` clears the record's value.
pub fn parse_update(pairs: Vec<(String, String)>) -> Result<UpdateIntent, ApiError> {
    let params = Params::new(pairs);

    Ok(UpdateIntent {
        name: params.name()?,
        value: params.get("value").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn is_bad_request<T: std::fmt::Debug>(res: Result<T, ApiError>) -> bool {
        matches!(res, Err(ApiError::BadRequest(_)))
    }

    #[test]
    fn create_accepts_name_with_optional_value() {
        assert_eq!(
            parse_create(q(&[("name", "Bob")])).unwrap(),
            CreateIntent {
                name: "Bob".into(),
                value: String::new()
            }
        );
        assert_eq!(
            parse_create(q(&[("value", "hi"), ("name", "Bob")])).unwrap(),
            CreateIntent {
                name: "Bob".into(),
                value: "hi".into()
            }
        );
    }

    #[test]
    fn create_rejects_bad_parameter_sets() {
        assert!(is_bad_request(parse_create(q(&[]))));
        assert!(is_bad_request(parse_create(q(&[("value", "hi")]))));
        assert!(is_bad_request(parse_create(q(&[("name", "Bob"), ("id", "3")]))));
        assert!(is_bad_request(parse_create(q(&[("name", "")]))));
        assert!(is_bad_request(parse_create(q(&[
            ("name", "Bob"),
            ("value", "hi"),
            ("extra", "x"),
        ]))));
    }

    #[test]
    fn repeated_keys_count_once_and_first_wins() {
        let intent = parse_create(q(&[("name", "a"), ("name", "b"), ("value", "v")])).unwrap();
        assert_eq!(intent.name, "a");
        assert_eq!(
            parse_selector(q(&[("id", "4"), ("id", "5")])).unwrap(),
            Selector::Id(4)
        );
    }

    #[test]
    fn selector_by_id_name_or_all() {
        assert_eq!(parse_selector(q(&[("id", "12")])).unwrap(), Selector::Id(12));
        assert_eq!(parse_selector(q(&[("id", "-1")])).unwrap(), Selector::All);
        assert_eq!(
            parse_selector(q(&[("name", "Bob")])).unwrap(),
            Selector::Name("Bob".into())
        );
    }

    #[test]
    fn selector_requires_exactly_one_known_key() {
        assert!(is_bad_request(parse_selector(q(&[]))));
        assert!(is_bad_request(parse_selector(q(&[("id", "1"), ("name", "Bob")]))));
        assert!(is_bad_request(parse_selector(q(&[("value", "x")]))));
        assert!(is_bad_request(parse_selector(q(&[("id", "one")]))));
        assert!(is_bad_request(parse_selector(q(&[("id", "")]))));
    }

    #[test]
    fn update_defaults_value_to_empty() {
        assert_eq!(
            parse_update(q(&[("name", "Bob")])).unwrap(),
            UpdateIntent {
                name: "Bob".into(),
                value: String::new()
            }
        );
        assert_eq!(parse_update(q(&[("name", "Bob"), ("value", "bye")])).unwrap().value, "bye");
        assert!(is_bad_request(parse_update(q(&[("value", "bye")]))));
    }
}
