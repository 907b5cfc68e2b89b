use super::SimpleResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use strum::{Display, EnumIter, IntoStaticStr};

pub const FEATURED_SENTINEL: &str = "on";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, Display, EnumIter, IntoStaticStr, PartialEq)]
pub enum CanonicalGenre {
    Action,
    Aventure,
    #[strum(serialize = "RPG")]
    Rpg,
    Simulation,
    Sport,
    #[strum(serialize = "MMORPG")]
    Mmorpg,
}

#[derive(Clone, Debug, FromRow, PartialEq, Serialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, FromRow, PartialEq, Serialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

/// A game joined with the names of its genre and publisher.
#[derive(Clone, Debug, FromRow, PartialEq, Serialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub featured: bool,
    pub genre_id: i64,
    pub genre_name: String,
    pub publisher_id: i64,
    pub publisher_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameInput {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub featured: bool,
    pub genre_id: i64,
    pub publisher_id: i64,
}

/// Urlencoded body of the game creation and edition forms.
#[derive(Debug, Default, Deserialize)]
pub struct GameForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    #[serde(rename = "genreId", default)]
    pub genre_id: String,
    #[serde(rename = "publisherId", default)]
    pub publisher_id: String,
    pub mise_en_avant: Option<String>,
    pub featured: Option<String>,
}

impl TryFrom<&GameForm> for GameInput {
    type Error = simple_error::SimpleError;

    fn try_from(game_form: &GameForm) -> SimpleResult<Self> {
        Ok(Self {
            title: game_form.title.clone(),
            description: game_form.description.clone(),
            release_date: parse_date(&game_form.release_date)?,
            featured: parse_featured(game_form.mise_en_avant.as_deref())
                || parse_featured(game_form.featured.as_deref()),
            genre_id: parse_id("genreId", &game_form.genre_id)?,
            publisher_id: parse_id("publisherId", &game_form.publisher_id)?,
        })
    }
}

/// Urlencoded body of the genre and publisher forms.
#[derive(Debug, Default, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

pub fn parse_featured(value: Option<&str>) -> bool {
    value == Some(FEATURED_SENTINEL)
}

pub fn parse_date(value: &str) -> SimpleResult<NaiveDate> {
    Ok(try_with!(
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT),
        "Invalid releaseDate"
    ))
}

pub fn parse_id(field: &str, value: &str) -> SimpleResult<i64> {
    Ok(try_with!(i64::from_str(value.trim()), "Invalid {}", field))
}
