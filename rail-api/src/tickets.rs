use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use rail_booking::Receipt;
use rail_shared::{Journey, PassengerDetails};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use crate::error::AppError;
use crate::sections::SectionParam;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JourneyPayload {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseTicketRequest {
    pub user: UserPayload,
    pub journey: JourneyPayload,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseTicketResponse {
    pub ticket_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketView {
    pub id: Uuid,
    pub price: f64,
    pub section: SectionParam,
    pub seat: u32,
    pub from: String,
    pub to: String,
    pub user: UserView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptResponse {
    pub ticket: TicketView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModifySeatResponse {
    pub ticket_id: Uuid,
    pub section: SectionParam,
    pub seat: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveUserResponse {
    pub removed: bool,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        let Receipt { ticket, user } = receipt;
        Self {
            ticket: TicketView {
                id: ticket.id,
                price: ticket.price,
                section: ticket.section.into(),
                seat: ticket.seat,
                from: ticket.source,
                to: ticket.destination,
                user: UserView {
                    id: user.id,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    email: user.email,
                },
            },
        }
    }
}

impl PurchaseTicketRequest {
    /// Reject malformed input before it reaches the booking service
    pub fn validate(self) -> Result<(PassengerDetails, Journey), AppError> {
        let first_name = required("user.first_name", self.user.first_name)?;
        let last_name = required("user.last_name", self.user.last_name)?;
        let email = required("user.email", self.user.email)?;
        validate_email(&email)?;
        let from = required("journey.from", self.journey.from)?;
        let to = required("journey.to", self.journey.to)?;

        Ok((
            PassengerDetails { first_name, last_name, email },
            Journey { from, to },
        ))
    }
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError("user.email is not a valid email address".to_string()))
    }
}

pub fn parse_ticket_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid ticket id", raw)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", post(purchase_ticket))
        .route("/v1/tickets/{ticket_id}", get(get_receipt).delete(remove_user))
        .route("/v1/tickets/{ticket_id}/seat", put(modify_seat))
}

async fn purchase_ticket(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseTicketRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PurchaseTicketResponse>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let (details, journey) = req.validate()?;

    let ticket_id = state.booking.purchase(&details, &journey)?;
    info!("Purchased ticket {}", ticket_id);

    Ok((StatusCode::CREATED, Json(PurchaseTicketResponse { ticket_id })))
}

async fn get_receipt(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let ticket_id = parse_ticket_id(&ticket_id)?;
    let receipt = state.booking.get_receipt(ticket_id)?;
    Ok(Json(receipt.into()))
}

async fn modify_seat(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<ModifySeatResponse>, AppError> {
    let ticket_id = parse_ticket_id(&ticket_id)?;
    let ticket = state.booking.modify_seat(ticket_id)?;

    Ok(Json(ModifySeatResponse {
        ticket_id: ticket.id,
        section: ticket.section.into(),
        seat: ticket.seat,
    }))
}

async fn remove_user(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<RemoveUserResponse>, AppError> {
    let ticket_id = parse_ticket_id(&ticket_id)?;
    state.booking.remove_booking(ticket_id)?;
    Ok(Json(RemoveUserResponse { removed: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> PurchaseTicketRequest {
        PurchaseTicketRequest {
            user: UserPayload {
                first_name: " John ".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
            },
            journey: JourneyPayload {
                from: "London".to_string(),
                to: "France".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_request() {
        let (details, journey) = request("john@example.com").validate().unwrap();
        assert_eq!(details.first_name, "John");
        assert_eq!(details.email, "john@example.com");
        assert_eq!(journey.to, "France");
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "   ", "john", "@example.com", "john@", "jo hn@example.com", "a@b@c"] {
            assert!(request(email).validate().is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn test_empty_journey_rejected() {
        let mut req = request("john@example.com");
        req.journey.from = " ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_parse_ticket_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_ticket_id(&id.to_string()).unwrap(), id);
        assert!(parse_ticket_id("not-a-uuid").is_err());
    }
}
