//! CSV export of the full nomination set.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use meet_goias_core::Nomination;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

const EXPORT_FILENAME: &str = "indicacoes_goias.csv";

/// Download every nomination as a CSV attachment.
pub async fn csv(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let nominations = state.store().list_all().await?;
    let body = to_csv(&nominations);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"indicacoes_goias.csv\""),
    );

    tracing::info!(rows = nominations.len(), file = EXPORT_FILENAME, "CSV export");
    Ok((headers, body))
}

/// Render nominations as CSV.
///
/// The free-text columns are double-quoted; ids, dates, status, and IPs never
/// contain commas or quotes, so they go out bare. Dates use the Brazilian
/// day/month/year convention.
fn to_csv(nominations: &[Nomination]) -> String {
    let mut lines = Vec::with_capacity(nominations.len() + 1);
    lines.push("ID,Data,Prato,Restaurante,Cidade,Status,IP".to_owned());

    for n in nominations {
        lines.push(format!(
            "{},{},\"{}\",\"{}\",\"{}\",{},{}",
            n.id,
            n.created_at.format("%d/%m/%Y"),
            n.dish_name,
            n.restaurant_name,
            n.city,
            n.status,
            n.ip
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use meet_goias_core::{NominationId, Status};

    use super::*;

    fn nomination(dish: &str, status: Status) -> Nomination {
        Nomination {
            id: NominationId::generate(),
            dish_name: dish.to_owned(),
            restaurant_name: "Mercado Central".to_owned(),
            city: "Goiânia".to_owned(),
            description: None,
            notes: None,
            status,
            ip: "203.0.113.9".to_owned(),
            user_agent: "test".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_to_csv_header_only_when_empty() {
        assert_eq!(to_csv(&[]), "ID,Data,Prato,Restaurante,Cidade,Status,IP");
    }

    #[test]
    fn test_to_csv_rows_and_quoting() {
        let rows = vec![
            nomination("Empadão Goiano", Status::Approved),
            nomination("Pamonha", Status::Pending),
        ];
        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,Data,Prato,Restaurante,Cidade,Status,IP");
        assert!(lines[1].contains("05/03/2026"));
        assert!(lines[1].contains("\"Empadão Goiano\",\"Mercado Central\",\"Goiânia\""));
        assert!(lines[1].ends_with("APPROVED,203.0.113.9"));
        assert!(lines[2].contains("PENDING"));
    }

    #[test]
    fn test_to_csv_includes_every_status() {
        let rows = vec![
            nomination("A", Status::Approved),
            nomination("B", Status::Rejected),
            nomination("C", Status::Pending),
        ];
        let csv = to_csv(&rows);
        assert_eq!(csv.split('\n').count(), 4);
        assert!(csv.contains("REJECTED"));
    }
}
