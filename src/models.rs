use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    entities::{director, genre, movie},
    error::{AppError, AppResult},
};

/// Wire form of a movie. Every key is always present; missing values are `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for MovieRecord {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

/// Projection shared by genres and directors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedRecord {
    pub id: i32,
    pub name: Option<String>,
}

impl From<genre::Model> for NamedRecord {
    fn from(m: genre::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

impl From<director::Model> for NamedRecord {
    fn from(m: director::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// One element of a genre/director request body. Unknown keys are ignored.
///
/// `name` distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`); only the former is malformed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NamedInput {
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl NamedInput {
    /// Fields for a new row: the `id` and `name` keys are both required.
    pub fn into_new(self) -> AppResult<(i32, Option<String>)> {
        let id = self.id.ok_or_else(|| missing("id"))?;
        let name = self.name.ok_or_else(|| missing("name"))?;
        Ok((id, name))
    }

    pub fn into_name(self) -> AppResult<Option<String>> {
        self.name.ok_or_else(|| missing("name"))
    }
}

/// Request bodies are lists; only the first element is read.
pub fn first_input(body: Vec<NamedInput>) -> AppResult<NamedInput> {
    body.into_iter()
        .next()
        .ok_or_else(|| AppError::MalformedInput("expected a non-empty list of records".into()))
}

fn missing(field: &str) -> AppError {
    AppError::MalformedInput(format!("missing field `{field}`"))
}
