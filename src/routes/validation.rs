use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult, FieldError},
    models::NewFavorite,
};

/// Validates a `POST /favorites` body field by field.
///
/// `imdbID`, `Title` and `Year` must be non-empty strings; `Poster` must be a string
/// and may be empty. Every failing field is reported, not just the first.
pub fn parse_add_favorite(body: &Value) -> AppResult<NewFavorite> {
    let Some(object) = body.as_object() else {
        return Err(AppError::Validation(vec![FieldError::new(
            "body",
            "Expected a JSON object",
        )]));
    };

    let mut errors = Vec::new();
    let imdb_id = required_string(object, "imdbID", &mut errors);
    let title = required_string(object, "Title", &mut errors);
    let year = required_string(object, "Year", &mut errors);
    let poster = string_field(object, "Poster", &mut errors);

    match (imdb_id, title, year, poster) {
        (Some(imdb_id), Some(title), Some(year), Some(poster)) => Ok(NewFavorite {
            imdb_id,
            title,
            year,
            poster,
        }),
        _ => Err(AppError::Validation(errors)),
    }
}

/// A string field that must be present and non-empty
fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = string_field(object, field, errors)?;
    if value.is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", field)));
        return None;
    }
    Some(value)
}

/// A string field that must be present, possibly empty
fn string_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(value)) => Some(value.clone()),
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_errors(result: AppResult<NewFavorite>) -> Vec<FieldError> {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body() {
        let body = json!({"imdbID": "tt1", "Title": "A", "Year": "2020", "Poster": ""});
        let candidate = parse_add_favorite(&body).unwrap();

        assert_eq!(candidate.imdb_id, "tt1");
        assert_eq!(candidate.title, "A");
        assert_eq!(candidate.year, "2020");
        assert_eq!(candidate.poster, "");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = json!({
            "imdbID": "tt1", "Title": "A", "Year": "2020", "Poster": "p.jpg",
            "id": "caller-supplied", "addedAt": "2020-01-01T00:00:00Z"
        });
        assert!(parse_add_favorite(&body).is_ok());
    }

    #[test]
    fn test_empty_required_fields() {
        let body = json!({"imdbID": "", "Title": "", "Year": "", "Poster": ""});
        let errors = field_errors(parse_add_favorite(&body));

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["imdbID", "Title", "Year"]);
        assert_eq!(errors[0].message, "imdbID is required");
    }

    #[test]
    fn test_missing_fields() {
        let errors = field_errors(parse_add_favorite(&json!({})));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["imdbID", "Title", "Year", "Poster"]);
    }

    #[test]
    fn test_wrong_types() {
        let body = json!({"imdbID": "tt1", "Title": 42, "Year": "2020", "Poster": null});
        let errors = field_errors(parse_add_favorite(&body));

        assert_eq!(
            errors,
            vec![
                FieldError::new("Title", "Title must be a string"),
                FieldError::new("Poster", "Poster is required"),
            ]
        );
    }

    #[test]
    fn test_non_object_body() {
        let errors = field_errors(parse_add_favorite(&json!(["tt1"])));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "body");
    }
}
