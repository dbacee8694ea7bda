use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Poster value OMDb uses when it has no image for a title
pub const OMDB_NO_POSTER: &str = "N/A";

/// Movie summary as returned by a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    /// Empty when the source has no poster
    #[serde(rename = "Poster")]
    pub poster: String,
}

/// A movie saved to the favorites list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub id: Uuid,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    /// Builds a favorite from a candidate, stamping a fresh id and the current time
    pub fn from_candidate(candidate: NewFavorite) -> Self {
        Self {
            id: Uuid::new_v4(),
            imdb_id: candidate.imdb_id,
            title: candidate.title,
            year: candidate.year,
            poster: candidate.poster,
            added_at: Utc::now(),
        }
    }

    /// The movie fields of this favorite
    pub fn to_movie(&self) -> Movie {
        Movie {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
        }
    }
}

/// Candidate for insertion into the favorites repository.
///
/// Carries only the movie fields; `id` and `addedAt` are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
}

impl From<Movie> for NewFavorite {
    fn from(movie: Movie) -> Self {
        Self {
            imdb_id: movie.imdb_id,
            title: movie.title,
            year: movie.year,
            poster: movie.poster,
        }
    }
}

// ============================================================================
// HTTP response bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub movies: Vec<Movie>,
    pub total: usize,
    pub page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteResponse {
    pub favorite: Favorite,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFavoriteResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw search response from the OMDb API.
///
/// Either `{"Search": [...], "Response": "True"}` or `{"Response": "False", "Error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbMovie>>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response != "False"
    }
}

/// One entry of an OMDb search result
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl From<OmdbMovie> for Movie {
    fn from(item: OmdbMovie) -> Self {
        let poster = if item.poster == OMDB_NO_POSTER {
            String::new()
        } else {
            item.poster
        };

        Movie {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> NewFavorite {
        NewFavorite {
            imdb_id: "tt0372784".to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
            poster: "https://example.com/batman.jpg".to_string(),
        }
    }

    #[test]
    fn test_movie_serializes_with_omdb_field_names() {
        let movie = Movie {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: String::new(),
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["imdbID"], "tt1375666");
        assert_eq!(json["Title"], "Inception");
        assert_eq!(json["Year"], "2010");
        assert_eq!(json["Poster"], "");
    }

    #[test]
    fn test_favorite_from_candidate_generates_id_and_timestamp() {
        let before = Utc::now();
        let favorite = Favorite::from_candidate(candidate());

        assert_eq!(favorite.imdb_id, "tt0372784");
        assert_eq!(favorite.title, "Batman Begins");
        assert!(favorite.added_at >= before);
        assert_ne!(favorite.id, Favorite::from_candidate(candidate()).id);
    }

    #[test]
    fn test_favorite_serializes_added_at() {
        let favorite = Favorite::from_candidate(candidate());
        let json = serde_json::to_value(&favorite).unwrap();

        assert_eq!(json["id"], favorite.id.to_string());
        assert!(json["addedAt"].is_string());

        let back: Favorite = serde_json::from_value(json).unwrap();
        assert_eq!(back, favorite);
    }

    #[test]
    fn test_favorite_to_movie() {
        let favorite = Favorite::from_candidate(candidate());
        let movie = favorite.to_movie();
        assert_eq!(movie.imdb_id, favorite.imdb_id);
        assert_eq!(movie.poster, favorite.poster);
    }

    #[test]
    fn test_omdb_movie_with_na_poster_maps_to_empty() {
        let item = OmdbMovie {
            imdb_id: "tt0000001".to_string(),
            title: "Obscure".to_string(),
            year: "1999".to_string(),
            poster: "N/A".to_string(),
        };

        let movie: Movie = item.into();
        assert_eq!(movie.poster, "");
    }

    #[test]
    fn test_omdb_movie_keeps_real_poster() {
        let item = OmdbMovie {
            imdb_id: "tt0372784".to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
            poster: "https://example.com/batman.jpg".to_string(),
        };

        let movie: Movie = item.into();
        assert_eq!(movie.poster, "https://example.com/batman.jpg");
    }

    #[test]
    fn test_omdb_false_response_deserialization() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert!(response.search.is_none());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_omdb_search_response_deserialization() {
        let json = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        let items = response.search.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].imdb_id, "tt0372784");
    }
}
