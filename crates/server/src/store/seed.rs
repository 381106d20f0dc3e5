//! Initial nomination data, loaded on first use of an empty storage file.

use chrono::{Duration, Utc};
use meet_goias_core::{Nomination, NominationId, Status};

/// The nominations seeded when the collection is absent from storage.
#[must_use]
pub fn seed_nominations() -> Vec<Nomination> {
    let now = Utc::now();
    vec![
        Nomination {
            id: NominationId::generate(),
            dish_name: "Empadão Goiano".to_owned(),
            restaurant_name: "Mercado Central".to_owned(),
            city: "Goiânia".to_owned(),
            description: Some("O tradicional empadão com guariroba e linguiça.".to_owned()),
            notes: None,
            status: Status::Approved,
            ip: "192.168.1.1".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            created_at: now - Duration::days(2),
        },
        Nomination {
            id: NominationId::generate(),
            dish_name: "Pamonha Salgada".to_owned(),
            restaurant_name: "Pamonharia Frutos da Terra".to_owned(),
            city: "Goiânia".to_owned(),
            description: None,
            notes: None,
            status: Status::Approved,
            ip: "192.168.1.2".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            created_at: now - Duration::days(5),
        },
        Nomination {
            id: NominationId::generate(),
            dish_name: "Arroz com Pequi".to_owned(),
            restaurant_name: "Restaurante do Cerrado".to_owned(),
            city: "Pirenópolis".to_owned(),
            description: None,
            notes: None,
            status: Status::Approved,
            ip: "192.168.1.3".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            created_at: now - Duration::days(1),
        },
        Nomination {
            id: NominationId::generate(),
            dish_name: "Galinhada".to_owned(),
            restaurant_name: "Rancho Fogão de Lenha".to_owned(),
            city: "Trindade".to_owned(),
            description: None,
            notes: None,
            status: Status::Pending,
            ip: "192.168.1.4".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            created_at: now,
        },
    ]
}
