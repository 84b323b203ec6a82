use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AddMovieRequest {
    #[serde(default)]
    pub movie_name: Option<String>,
}
