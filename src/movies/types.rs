// Movie resource types
// Wire format: {"id", "isbn", "title", "director": {"firstname", "lastname"} | null}

use serde::{Deserialize, Serialize};

/// A movie record held in the store
///
/// Every field defaults to empty when absent from the request body, so
/// partial payloads decode. Older clients send the title under `"string"`;
/// see `MovieInput` for how the two keys combine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MovieInput")]
pub struct Movie {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub director: Option<Director>,
}

/// Director of a movie, owned inline by its `Movie`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DirectorInput")]
pub struct Director {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

/// Request-side shape of a movie
///
/// `"string"` wins over `"title"` when both are sent, matching what legacy
/// clients sending both keys got stored.
#[derive(Deserialize, Default)]
#[serde(default)]
struct MovieInput {
    id: String,
    isbn: String,
    title: Option<String>,
    #[serde(rename = "string")]
    legacy_title: Option<String>,
    director: Option<Director>,
}

impl From<MovieInput> for Movie {
    fn from(input: MovieInput) -> Self {
        Self {
            id: input.id,
            isbn: input.isbn,
            title: input.legacy_title.or(input.title).unwrap_or_default(),
            director: input.director,
        }
    }
}

/// Request-side shape of a director; the lowercase keys win over camelCase
#[derive(Deserialize, Default)]
#[serde(default)]
struct DirectorInput {
    firstname: Option<String>,
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    lastname: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
}

impl From<DirectorInput> for Director {
    fn from(input: DirectorInput) -> Self {
        Self {
            first_name: input.firstname.or(input.first_name).unwrap_or_default(),
            last_name: input.lastname.or(input.last_name).unwrap_or_default(),
        }
    }
}

impl Movie {
    pub fn new(id: &str, isbn: &str, title: &str, director: Option<Director>) -> Self {
        Self {
            id: id.to_string(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            director,
        }
    }

    /// Same record with a different id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        id.clone_into(&mut self.id);
        self
    }
}

impl Director {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// The two records present at startup when seeding is enabled
pub fn seed_movies() -> Vec<Movie> {
    vec![
        Movie::new("1", "438227", "Movie One", Some(Director::new("John", "Doe"))),
        Movie::new("2", "454556", "Movie Two", Some(Director::new("Steve", "Smith"))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_wire_keys() {
        let movie = Movie::new("7", "123", "Alien", Some(Director::new("Ridley", "Scott")));
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["isbn"], "123");
        assert_eq!(value["title"], "Alien");
        assert_eq!(value["director"]["firstname"], "Ridley");
        assert_eq!(value["director"]["lastname"], "Scott");
        assert!(value.get("string").is_none());
    }

    #[test]
    fn test_serialize_missing_director_as_null() {
        let movie = Movie::new("1", "1", "Untitled", None);
        let value = serde_json::to_value(&movie).unwrap();
        assert!(value["director"].is_null());
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let movie: Movie = serde_json::from_str(r#"{"isbn":"999","title":"X"}"#).unwrap();
        assert_eq!(movie.id, "");
        assert_eq!(movie.isbn, "999");
        assert_eq!(movie.title, "X");
        assert_eq!(movie.director, None);
    }

    #[test]
    fn test_deserialize_legacy_title_key() {
        let movie: Movie = serde_json::from_str(
            r#"{"isbn":"1","string":"Legacy","director":{"firstName":"Ann","lastname":"Lee"}}"#,
        )
        .unwrap();
        assert_eq!(movie.title, "Legacy");
        assert_eq!(movie.director, Some(Director::new("Ann", "Lee")));
    }

    #[test]
    fn test_deserialize_both_title_keys() {
        let movie: Movie =
            serde_json::from_str(r#"{"title":"A","string":"B","isbn":"1"}"#).unwrap();
        assert_eq!(movie.title, "B");
        assert_eq!(movie.isbn, "1");

        let movie: Movie = serde_json::from_str(r#"{"string":"B","title":"A"}"#).unwrap();
        assert_eq!(movie.title, "B");
    }

    #[test]
    fn test_deserialize_both_director_key_styles() {
        let movie: Movie = serde_json::from_str(
            r#"{"director":{"firstName":"x","firstname":"Ann","lastName":"Lee"}}"#,
        )
        .unwrap();
        assert_eq!(movie.director, Some(Director::new("Ann", "Lee")));
    }

    #[test]
    fn test_deserialize_null_title_is_empty() {
        let movie: Movie = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(movie.title, "");
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(serde_json::from_str::<Movie>(r#"{"isbn": 12"#).is_err());
        assert!(serde_json::from_str::<Movie>(r#"{"isbn": 12}"#).is_err());
        assert!(serde_json::from_str::<Movie>(r#""just text""#).is_err());
    }

    #[test]
    fn test_seed_movies() {
        let seeds = seed_movies();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].id, "1");
        assert_eq!(seeds[1].id, "2");
        assert_eq!(seeds[1].title, "Movie Two");
    }
}
