//! Demo tickets loaded at startup when seeding is enabled.

use recolour_core::catalog::catalog_photos;
use recolour_core::roles::AUTH_ROLE_OPERATOR;
use recolour_core::workflow::Priority;
use recolour_db::models::ticket::CreateTicket;

use crate::ticket_service::TicketService;

const CLIPPING_PATH: &str = "Keep clipping path for all pictures (only 1 clipping path)";

fn ticket(
    style: &str,
    priority: Priority,
    partner: &str,
    instructions: &[&str],
    photos: &[usize],
) -> CreateTicket {
    CreateTicket {
        style: style.to_string(),
        priority,
        partner: partner.to_string(),
        instructions: instructions.iter().map(|s| (*s).to_string()).collect(),
        reference_photos: Some(catalog_photos(photos)),
    }
}

/// The four demo tickets, in creation order.
pub fn demo_tickets() -> Vec<CreateTicket> {
    vec![
        ticket(
            "Granita - solid",
            Priority::Medium,
            "Studio Alpha",
            &[
                CLIPPING_PATH,
                "Granita - solid",
                "Fuchsia Fedora with AOP Block Libre",
            ],
            &[0, 1, 2, 13],
        ),
        ticket(
            "Night Sky - AOP White Dots",
            Priority::High,
            "Studio Alpha",
            &[
                CLIPPING_PATH,
                "Night Sky + AOP White Dots (DOTS CLOUD DANCER recoloured to Night Sky)",
                "Hedge Green - solid",
                "Navy Blazer - solid",
            ],
            &[3, 4, 5, 12],
        ),
        ticket(
            "Navy Blazer - solid",
            Priority::Low,
            "Studio Beta",
            &[
                CLIPPING_PATH,
                "Night Sky + AOP White Dots",
                "Hedge Green - solid",
                "Navy Blazer - solid",
            ],
            &[6, 7, 8, 12],
        ),
        ticket(
            "Fuchsia Fedora - AOP Block Libre",
            Priority::Urgent,
            "Studio Gamma",
            &[
                CLIPPING_PATH,
                "Granita - solid",
                "Fuchsia Fedora with AOP Block Libre",
            ],
            &[9, 10, 11, 13],
        ),
    ]
}

/// Seed the demo tickets as the operator.
pub fn seed_demo_data(service: &mut TicketService) {
    service.seed(demo_tickets(), AUTH_ROLE_OPERATOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use recolour_core::roles::Role;
    use recolour_core::sorting::TicketSort;
    use recolour_core::workflow::TicketStatus;
    use recolour_db::models::ticket::TicketFilters;
    use validator::Validate;

    #[test]
    fn demo_tickets_are_valid_with_four_reference_photos() {
        for input in demo_tickets() {
            assert!(input.validate().is_ok());
            assert_eq!(input.reference_photos.as_ref().map(Vec::len), Some(4));
        }
    }

    #[test]
    fn seeded_tickets_list_newest_first() {
        let mut service = TicketService::default();
        seed_demo_data(&mut service);

        let response = service.list(
            TicketFilters::default(),
            &TicketSort::default(),
            &Role::Manager,
        );
        let ids: Vec<&str> = response.data.iter().map(|v| v.ticket.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
        assert!(response
            .data
            .iter()
            .all(|v| v.ticket.status == TicketStatus::Pending));
        assert_eq!(
            service.repo().distinct_partners(),
            vec!["Studio Alpha", "Studio Beta", "Studio Gamma"]
        );
    }
}
