use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use rail_shared::Section;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::error::AppError;
use crate::state::AppState;

/// Section as it appears on the wire. Translation to the domain enum happens here only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SectionParam {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
}

impl FromStr for SectionParam {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(SectionParam::A),
            "B" => Ok(SectionParam::B),
            other => Err(AppError::ValidationError(format!("unknown section '{}'", other))),
        }
    }
}

impl From<SectionParam> for Section {
    fn from(param: SectionParam) -> Self {
        match param {
            SectionParam::A => Section::A,
            SectionParam::B => Section::B,
        }
    }
}

impl From<Section> for SectionParam {
    fn from(section: Section) -> Self {
        match section {
            Section::A => SectionParam::A,
            Section::B => SectionParam::B,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PassengerEntry {
    pub user_name: String,
    pub seat: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionPassengersResponse {
    pub section: SectionParam,
    pub passengers: Vec<PassengerEntry>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/sections/{section}/passengers", get(users_by_section))
}

async fn users_by_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<SectionPassengersResponse>, AppError> {
    let param = SectionParam::from_str(&section)?;

    let passengers = state.booking.list_by_section(param.into())?
        .into_iter()
        .map(|occupant| PassengerEntry {
            user_name: occupant.user_name,
            seat: occupant.seat,
        })
        .collect();

    Ok(Json(SectionPassengersResponse { section: param, passengers }))
}
