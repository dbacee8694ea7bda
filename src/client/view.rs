/// View models for the search and favorites pages
///
/// Pure functions over hook state; rendering is left to whatever front end consumes them.
use std::collections::HashMap;

use serde::Serialize;

use crate::{
    client::search::MovieSearch,
    models::{Favorite, Movie, OMDB_NO_POSTER},
};

pub mod messages {
    pub const NO_FAVORITES: &str = "You have not added any favorites yet";
    pub const NO_FAVORITES_SHORT: &str = "No favorites yet";
    pub const NO_RESULTS: &str = "No movies found";
    pub const START_SEARCHING: &str = "Start searching for movies";
    pub const LOADING_FAVORITES: &str = "Loading favorites...";
    pub const SEARCHING: &str = "Searching...";
    pub const LOAD_MORE: &str = "Load More Movies";
    pub const LOADING_MORE: &str = "Loading more...";
    pub const ADD_TO_FAVORITES: &str = "Add to Favorites";
    pub const REMOVE_FROM_FAVORITES: &str = "Remove from Favorites";
    pub const SEARCH_MOVIES: &str = "Search Movies";
}

pub fn pluralize(count: usize, singular: &str, plural: Option<&str>) -> String {
    if count == 1 {
        return singular.to_string();
    }
    plural
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}s", singular))
}

pub fn format_favorite_count(count: usize) -> String {
    if count == 0 {
        return messages::NO_FAVORITES_SHORT.to_string();
    }
    format!(
        "You have {} favorite {}",
        count,
        pluralize(count, "movie", None)
    )
}

/// One movie per imdbID. Each id keeps the slot of its first occurrence and the
/// data of its last one.
pub fn unique_movies(movies: &[Movie]) -> Vec<Movie> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<Movie> = Vec::new();

    for movie in movies {
        match slots.get(movie.imdb_id.as_str()) {
            Some(&slot) => unique[slot] = movie.clone(),
            None => {
                slots.insert(movie.imdb_id.as_str(), unique.len());
                unique.push(movie.clone());
            }
        }
    }

    unique
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieCardView {
    pub movie: Movie,
    pub is_favorite: bool,
    pub is_loading: bool,
}

impl MovieCardView {
    /// Poster URL to display, if the movie has a usable one
    pub fn poster(&self) -> Option<&str> {
        let poster = self.movie.poster.as_str();
        (!poster.is_empty() && poster != OMDB_NO_POSTER).then_some(poster)
    }

    /// The toggle button is disabled while a toggle for this movie is pending
    pub fn is_button_disabled(&self) -> bool {
        self.is_loading
    }

    /// `None` while loading, when a spinner replaces the label
    pub fn button_label(&self) -> Option<&'static str> {
        match (self.is_loading, self.is_favorite) {
            (true, _) => None,
            (false, true) => Some(messages::REMOVE_FROM_FAVORITES),
            (false, false) => Some(messages::ADD_TO_FAVORITES),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridView {
    Empty { message: &'static str },
    Cards { cards: Vec<MovieCardView> },
}

pub fn movie_grid(
    movies: &[Movie],
    favorites: &[Favorite],
    loading_states: &HashMap<String, bool>,
) -> GridView {
    if movies.is_empty() {
        return GridView::Empty {
            message: messages::NO_RESULTS,
        };
    }

    let cards = unique_movies(movies)
        .into_iter()
        .map(|movie| MovieCardView {
            is_favorite: favorites.iter().any(|fav| fav.imdb_id == movie.imdb_id),
            is_loading: loading_states
                .get(&movie.imdb_id)
                .copied()
                .unwrap_or(false),
            movie,
        })
        .collect();

    GridView::Cards { cards }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadMoreView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchPageView {
    Prompt { message: &'static str },
    Loading { message: &'static str },
    Results {
        grid: GridView,
        load_more: Option<LoadMoreView>,
    },
}

pub fn search_page(
    search: &MovieSearch,
    favorites: &[Favorite],
    loading_states: &HashMap<String, bool>,
) -> SearchPageView {
    if search.search_query().is_empty() {
        return SearchPageView::Prompt {
            message: messages::START_SEARCHING,
        };
    }
    if search.is_loading() {
        return SearchPageView::Loading {
            message: messages::SEARCHING,
        };
    }

    let fetching = search.is_fetching_next_page();
    let load_more = search.has_next_page().then(|| LoadMoreView {
        label: if fetching {
            messages::LOADING_MORE
        } else {
            messages::LOAD_MORE
        },
        disabled: fetching,
    });

    SearchPageView::Results {
        grid: movie_grid(&search.search_results(), favorites, loading_states),
        load_more,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FavoritesPageView {
    Loading {
        message: &'static str,
    },
    Empty {
        subtitle: &'static str,
        message: &'static str,
        action_label: &'static str,
        action_href: &'static str,
    },
    Grid {
        subtitle: String,
        grid: GridView,
    },
}

pub fn favorites_page(
    favorites: &[Favorite],
    is_loading: bool,
    loading_states: &HashMap<String, bool>,
) -> FavoritesPageView {
    if is_loading {
        return FavoritesPageView::Loading {
            message: messages::LOADING_FAVORITES,
        };
    }
    if favorites.is_empty() {
        return FavoritesPageView::Empty {
            subtitle: messages::NO_FAVORITES,
            message: messages::NO_FAVORITES_SHORT,
            action_label: messages::SEARCH_MOVIES,
            action_href: "/",
        };
    }

    let movies: Vec<Movie> = favorites.iter().map(Favorite::to_movie).collect();
    FavoritesPageView::Grid {
        subtitle: format_favorite_count(favorites.len()),
        grid: movie_grid(&movies, favorites, loading_states),
    }
}
