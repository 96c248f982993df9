use rail_booking::{BookingRules, BookingService};
use rail_catalog::{SeatingPlan, Tariff};
use rail_core::BookingError;
use rail_shared::{Journey, PassengerDetails, Placement, Section};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

fn passenger(n: usize) -> PassengerDetails {
    PassengerDetails {
        first_name: format!("Passenger{}", n),
        last_name: "Smith".to_string(),
        email: format!("passenger{}@example.com", n),
    }
}

fn journey() -> Journey {
    Journey { from: "London".to_string(), to: "France".to_string() }
}

fn service(plan: SeatingPlan, seed: u64) -> BookingService {
    BookingService::in_memory(plan, Tariff::default(), BookingRules::seeded(seed))
}

/// Generous retry budget: every lost race is another thread's successful commit
fn contended_service(plan: SeatingPlan, seed: u64) -> BookingService {
    let rules = BookingRules {
        commit_attempts: 128,
        rng_seed: Some(seed),
    };
    BookingService::in_memory(plan, Tariff::default(), rules)
}

fn placement_of(service: &BookingService, id: Uuid) -> Placement {
    service.get_receipt(id).unwrap().ticket.placement()
}

/// Listing and occupancy agree, and no seat is held twice
fn assert_consistent(service: &BookingService, plan: SeatingPlan) {
    for section in Section::ALL {
        let occupancy = service.occupancy(section);
        assert!(occupancy.len() <= plan.capacity(section) as usize);

        let listed: Vec<u32> = service.list_by_section(section).unwrap().iter().map(|o| o.seat).collect();
        let unique: HashSet<u32> = listed.iter().copied().collect();
        assert_eq!(unique.len(), listed.len(), "duplicate seat in section {}", section);
        assert_eq!(listed, occupancy.occupied_seats());
    }
}

#[test]
fn test_purchase_round_trip() {
    let plan = SeatingPlan::default();
    let service = service(plan, 1);
    let details = PassengerDetails {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@example.com".to_string(),
    };

    let ticket_id = service.purchase(&details, &journey()).unwrap();
    let receipt = service.get_receipt(ticket_id).unwrap();

    assert_eq!(receipt.ticket.source, "London");
    assert_eq!(receipt.ticket.destination, "France");
    assert_eq!(receipt.ticket.user_id, receipt.user.id);
    assert_eq!(receipt.user.first_name, "John");
    assert_eq!(receipt.user.last_name, "Doe");
    assert_eq!(receipt.ticket.price, service.price_of(receipt.ticket.section));
    assert!((1..=plan.capacity(receipt.ticket.section)).contains(&receipt.ticket.seat));
}

#[test]
fn test_saturation_and_reuse_after_removal() {
    let plan = SeatingPlan::uniform(2);
    let service = service(plan, 9);

    let ids: Vec<Uuid> = (0..4).map(|n| service.purchase(&passenger(n), &journey()).unwrap()).collect();
    assert!(service.occupancy(Section::A).is_full());
    assert!(service.occupancy(Section::B).is_full());

    // Fifth passenger finds no seat
    assert_eq!(service.purchase(&passenger(4), &journey()), Err(BookingError::SeatUnavailable));
    assert_consistent(&service, plan);

    let freed = placement_of(&service, ids[1]);
    service.remove_booking(ids[1]).unwrap();

    let replacement = service.purchase(&passenger(5), &journey()).unwrap();
    assert_eq!(placement_of(&service, replacement), freed);
    assert_consistent(&service, plan);
}

#[test]
fn test_removal_is_final() {
    let plan = SeatingPlan::uniform(3);
    let service = service(plan, 2);
    let id = service.purchase(&passenger(0), &journey()).unwrap();
    let seat = placement_of(&service, id);

    let removed = service.remove_booking(id).unwrap();
    assert_eq!(removed.id, id);

    assert_eq!(service.get_receipt(id), Err(BookingError::TicketNotFound(id)));
    assert_eq!(service.remove_booking(id).unwrap_err(), BookingError::TicketNotFound(id));
    assert!(!service.occupancy(seat.section).contains(seat.seat));
}

#[test]
fn test_reseat_frees_old_seat_for_next_purchase() {
    let plan = SeatingPlan::new(2, 1);
    let service = service(plan, 4);

    let ids: Vec<Uuid> = (0..3).map(|n| service.purchase(&passenger(n), &journey()).unwrap()).collect();
    service.remove_booking(ids[0]).unwrap();

    // Exactly one seat is free, so the re-seat must take it
    let old = placement_of(&service, ids[1]);
    let moved = service.modify_seat(ids[1]).unwrap();
    assert_eq!(moved.id, ids[1]);
    assert_ne!(moved.placement(), old);
    assert!(service.occupancy(moved.section).contains(moved.seat));
    assert!(!service.occupancy(old.section).contains(old.seat));

    let newcomer = service.purchase(&passenger(9), &journey()).unwrap();
    assert_eq!(placement_of(&service, newcomer), old);
    assert_consistent(&service, plan);
}

#[test]
fn test_same_email_reuses_user() {
    let service = service(SeatingPlan::default(), 6);

    let first = service.purchase(&passenger(1), &journey()).unwrap();
    let second = service.purchase(&passenger(1), &journey()).unwrap();

    assert_ne!(first, second);
    assert_eq!(service.users().count(), 1);
    assert_eq!(
        service.get_receipt(first).unwrap().user.id,
        service.get_receipt(second).unwrap().user.id
    );
}

#[test]
fn test_concurrent_purchases_get_distinct_seats() {
    let plan = SeatingPlan::uniform(50);
    let service = Arc::new(contended_service(plan, 21));

    let ids: Vec<Uuid> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..100)
            .map(|n| {
                let service = Arc::clone(&service);
                scope.spawn(move || service.purchase(&passenger(n), &journey()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
    });

    let placements: HashSet<Placement> = ids.iter().map(|id| placement_of(&service, *id)).collect();
    assert_eq!(placements.len(), 100);
    assert!(service.occupancy(Section::A).is_full());
    assert!(service.occupancy(Section::B).is_full());
    assert_consistent(&service, plan);
}

#[test]
fn test_concurrent_oversubscription() {
    let plan = SeatingPlan::uniform(10);
    let service = Arc::new(contended_service(plan, 33));

    let results: Vec<Result<Uuid, BookingError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..30)
            .map(|n| {
                let service = Arc::clone(&service);
                scope.spawn(move || service.purchase(&passenger(n), &journey()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let booked = results.iter().filter(|r| r.is_ok()).count();
    let refused = results.iter().filter(|r| **r == Err(BookingError::SeatUnavailable)).count();
    assert_eq!(booked, 20);
    assert_eq!(refused, 10);
    assert_consistent(&service, plan);
}

#[test]
fn test_concurrent_mixed_operations_keep_invariants() {
    let plan = SeatingPlan::uniform(8);
    let service = Arc::new(contended_service(plan, 77));
    let seeded: Vec<Uuid> = (0..10).map(|n| service.purchase(&passenger(n), &journey()).unwrap()).collect();

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let service = Arc::clone(&service);
            let seeded = seeded.clone();
            scope.spawn(move || {
                for round in 0..25 {
                    let id = seeded[(worker + round) % seeded.len()];
                    match (worker + round) % 4 {
                        0 => {
                            // Churn: book and cancel so free seats keep moving
                            if let Ok(new_id) = service.purchase(&passenger(100 + worker * 25 + round), &journey()) {
                                service.remove_booking(new_id).unwrap();
                            }
                        }
                        1 | 2 => match service.modify_seat(id) {
                            Ok(_)
                            | Err(BookingError::SeatUnavailable)
                            | Err(BookingError::TicketNotFound(_)) => {}
                            Err(other) => panic!("unexpected re-seat failure: {}", other),
                        },
                        _ => {
                            let _ = service.get_receipt(id);
                            let _ = service.list_by_section(Section::A);
                        }
                    }
                }
            });
        }
    });

    assert_consistent(&service, plan);
    for id in seeded {
        let placement = placement_of(&service, id);
        assert!(service.occupancy(placement.section).contains(placement.seat));
    }
}
