//! Booking scenarios exercised against the in-memory database.

#![cfg(feature = "memory")]

use std::str::FromStr as _;

use common::Money;
use futures::future;
use service::{
    command::{
        book_rooms, create_room, create_room_type, register_guest,
        transit_reservation, BookRooms, CancelReservation,
        CompleteReservation, CreateRoom, CreateRoomType, RegisterGuest,
        SetRoomStatus,
    },
    domain::{
        guest, reservation, room, room_type, Guest, Reservation, Room,
    },
    infra::Memory,
    query::{self, FindAvailableRooms},
    read, Command as _, Service,
};
use tracerr::Traced;

type Svc = Service<Memory>;

fn date<Of: ?Sized>(s: &str) -> common::DateOf<Of> {
    s.parse().unwrap()
}

async fn room_type(svc: &Svc, name: &str, price: &str) -> room_type::Id {
    svc.execute(CreateRoomType {
        name: room_type::Name::new(name).unwrap(),
        base_price: Money::from_str(price).unwrap(),
        capacity: room_type::Capacity::new(2).unwrap(),
    })
    .await
    .unwrap()
    .id
}

async fn room(svc: &Svc, number: &str, room_type_id: room_type::Id) -> Room {
    svc.execute(CreateRoom {
        number: room::Number::new(number).unwrap(),
        room_type_id,
        floor: room::Floor::from(1),
        status: room::Status::Available,
    })
    .await
    .unwrap()
}

async fn guest(svc: &Svc, email: &str) -> Guest {
    svc.execute(RegisterGuest {
        first_name: guest::Name::new("Jane").unwrap(),
        last_name: guest::Name::new("Doe").unwrap(),
        email: guest::Email::new(email).unwrap(),
        phone: guest::Phone::new("+1 555 0100").unwrap(),
        address: None,
    })
    .await
    .unwrap()
}

fn booking(
    guest_id: guest::Id,
    room_ids: &[room::Id],
    check_in: &str,
    check_out: &str,
) -> BookRooms {
    BookRooms {
        guest_id,
        room_ids: room_ids.to_vec(),
        check_in: date(check_in),
        check_out: date(check_out),
    }
}

async fn book(
    svc: &Svc,
    guest_id: guest::Id,
    room_ids: &[room::Id],
    check_in: &str,
    check_out: &str,
) -> Result<Reservation, Traced<book_rooms::ExecutionError>> {
    svc.execute(booking(guest_id, room_ids, check_in, check_out))
        .await
}

async fn available(
    svc: &Svc,
    check_in: &str,
    check_out: &str,
) -> Vec<room::Id> {
    svc.execute(FindAvailableRooms {
        check_in: date(check_in),
        check_out: date(check_out),
    })
    .await
    .unwrap()
    .rooms()
    .iter()
    .map(|l| l.room.id)
    .collect()
}

/// Hotel with a `101` standard room for 100 USD and a `201` suite for
/// 250 USD.
async fn hotel() -> (Svc, Room, Room, Guest) {
    let svc = Service::new(Memory::new());
    let standard = room_type(&svc, "Standard", "100USD").await;
    let suite = room_type(&svc, "Suite", "250USD").await;
    let r101 = room(&svc, "101", standard).await;
    let r201 = room(&svc, "201", suite).await;
    let guest = guest(&svc, "jane@example.com").await;
    (svc, r101, r201, guest)
}

#[tokio::test]
async fn books_rooms_and_quotes_total_over_nights() {
    let (svc, r101, r201, guest) = hotel().await;

    let res = book(
        &svc,
        guest.id,
        &[r201.id, r101.id, r201.id],
        "2026-03-01",
        "2026-03-04",
    )
    .await
    .unwrap();

    assert_eq!(res.status, reservation::Status::Confirmed);
    assert_eq!(res.total, Money::from_str("1050USD").unwrap());
    assert_eq!(res.stay.nights(), 3);
    assert_eq!(res.room_ids.len(), 2);

    let stored = svc
        .execute(query::reservation::ById::by(res.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.total, res.total);
    assert_eq!(stored.room_ids, res.room_ids);
}

#[tokio::test]
async fn searches_only_unreserved_rooms_in_service() {
    let (svc, r101, r201, guest) = hotel().await;

    let search = svc
        .execute(FindAvailableRooms {
            check_in: date("2026-03-01"),
            check_out: date("2026-03-03"),
        })
        .await
        .unwrap();
    assert_eq!(search.nights(), 2);
    let numbers = search
        .rooms()
        .iter()
        .map(|l| l.room.number.to_string())
        .collect::<Vec<_>>();
    assert_eq!(numbers, ["101", "201"]);
    assert_eq!(
        search.quote(&[r101.id, r201.id]),
        Some(Money::from_str("700USD").unwrap()),
    );

    _ = book(&svc, guest.id, &[r101.id], "2026-03-02", "2026-03-05")
        .await
        .unwrap();
    assert_eq!(available(&svc, "2026-03-01", "2026-03-03").await, [r201.id]);

    _ = svc
        .execute(SetRoomStatus {
            room_id: r201.id,
            status: room::Status::OutOfService,
        })
        .await
        .unwrap();
    assert!(available(&svc, "2026-03-01", "2026-03-03").await.is_empty());
}

#[tokio::test]
async fn treats_stays_as_half_open_ranges() {
    let (svc, r101, _, guest) = hotel().await;

    _ = book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();

    assert_eq!(available(&svc, "2026-03-04", "2026-03-06").await.len(), 2);
    assert_eq!(available(&svc, "2026-02-27", "2026-03-01").await.len(), 2);
    assert_eq!(available(&svc, "2026-03-03", "2026-03-05").await.len(), 1);

    _ = book(&svc, guest.id, &[r101.id], "2026-03-04", "2026-03-06")
        .await
        .unwrap();
}

#[tokio::test]
async fn rejects_overlapping_booking_without_partial_effects() {
    let (svc, r101, r201, guest) = hotel().await;

    _ = book(&svc, guest.id, &[r201.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();

    let err = book(
        &svc,
        guest.id,
        &[r101.id, r201.id],
        "2026-03-03",
        "2026-03-05",
    )
    .await
    .unwrap_err();
    assert!(
        matches!(
            err.as_ref(),
            book_rooms::ExecutionError::RoomUnavailable(id) if *id == r201.id,
        ),
        "unexpected error: {err}",
    );

    assert_eq!(available(&svc, "2026-03-03", "2026-03-05").await, [r101.id]);
    let active = svc
        .execute(query::reservations::Active::by(read::reservation::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn rejects_invalid_booking_requests() {
    let (svc, r101, _, guest) = hotel().await;

    let err = book(&svc, guest.id, &[r101.id], "2026-03-04", "2026-03-04")
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::InvalidDateRange { .. },
    ));

    let err = book(&svc, guest.id, &[], "2026-03-01", "2026-03-04")
        .await
        .unwrap_err();
    assert!(matches!(err.as_ref(), book_rooms::ExecutionError::NoRooms));

    let unknown = guest::Id::new();
    let err = book(&svc, unknown, &[r101.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::GuestNotExists(id) if *id == unknown,
    ));

    let unknown = room::Id::new();
    let err = book(&svc, guest.id, &[unknown], "2026-03-01", "2026-03-04")
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::RoomNotExists(id) if *id == unknown,
    ));

    let err = svc
        .execute(FindAvailableRooms {
            check_in: date("2026-03-04"),
            check_out: date("2026-03-01"),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        query::find_available_rooms::ExecutionError::InvalidDateRange { .. },
    ));
}

#[tokio::test]
async fn rejects_booking_out_of_service_room() {
    let (svc, r101, _, guest) = hotel().await;

    _ = svc
        .execute(SetRoomStatus {
            room_id: r101.id,
            status: room::Status::OutOfService,
        })
        .await
        .unwrap();

    let err = book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-02")
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::RoomUnavailable(id) if *id == r101.id,
    ));
}

#[tokio::test]
async fn rejects_rooms_priced_in_different_currencies() {
    let (svc, r101, _, guest) = hotel().await;
    let euro = room_type(&svc, "Euro Double", "90EUR").await;
    let r301 = room(&svc, "301", euro).await;

    let err = book(
        &svc,
        guest.id,
        &[r101.id, r301.id],
        "2026-03-01",
        "2026-03-02",
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::MixedCurrencies,
    ));
}

#[tokio::test]
async fn books_from_search_only_found_rooms() {
    let (svc, r101, r201, guest) = hotel().await;
    _ = book(&svc, guest.id, &[r201.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();

    let search = svc
        .execute(FindAvailableRooms {
            check_in: date("2026-03-02"),
            check_out: date("2026-03-03"),
        })
        .await
        .unwrap();

    let err = BookRooms::from_search(guest.id, &search, [r101.id, r201.id])
        .unwrap_err();
    assert_eq!(err.0, r201.id);

    let cmd = BookRooms::from_search(guest.id, &search, [r101.id]).unwrap();
    let res = svc.execute(cmd).await.unwrap();
    assert_eq!(Some(res.total), search.quote(&[r101.id]));
}

#[tokio::test]
async fn cancellation_releases_rooms() {
    let (svc, r101, _, guest) = hotel().await;
    let res = book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();

    let cancelled = svc
        .execute(CancelReservation {
            reservation_id: res.id,
        })
        .await
        .unwrap();
    assert_eq!(cancelled.status, reservation::Status::Cancelled);
    assert_eq!(cancelled.total, res.total);

    assert!(available(&svc, "2026-03-01", "2026-03-04")
        .await
        .contains(&r101.id));
    _ = book(&svc, guest.id, &[r101.id], "2026-03-02", "2026-03-03")
        .await
        .unwrap();
}

#[tokio::test]
async fn transits_reservations_only_from_confirmed() {
    let (svc, r101, r201, guest) = hotel().await;
    let first = book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();
    let second = book(&svc, guest.id, &[r201.id], "2026-03-01", "2026-03-04")
        .await
        .unwrap();

    _ = svc
        .execute(CancelReservation {
            reservation_id: first.id,
        })
        .await
        .unwrap();
    let err = svc
        .execute(CancelReservation {
            reservation_id: first.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        transit_reservation::ExecutionError::InvalidStatusTransition {
            from: reservation::Status::Cancelled,
            to: reservation::Status::Cancelled,
            ..
        },
    ));

    let completed = svc
        .execute(CompleteReservation {
            reservation_id: second.id,
        })
        .await
        .unwrap();
    assert_eq!(completed.status, reservation::Status::Completed);
    let err = svc
        .execute(CancelReservation {
            reservation_id: second.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        transit_reservation::ExecutionError::InvalidStatusTransition { .. },
    ));

    let unknown = reservation::Id::new();
    let err = svc
        .execute(CompleteReservation {
            reservation_id: unknown,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        transit_reservation::ExecutionError::ReservationNotExists(id)
            if *id == unknown,
    ));
}

#[tokio::test]
async fn lists_active_reservations_latest_first() {
    let (svc, r101, r201, guest) = hotel().await;
    let early = book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-02")
        .await
        .unwrap();
    let late = book(
        &svc,
        guest.id,
        &[r201.id, r101.id],
        "2026-04-01",
        "2026-04-02",
    )
    .await
    .unwrap();
    let cancelled =
        book(&svc, guest.id, &[r201.id], "2026-05-01", "2026-05-02")
            .await
            .unwrap();
    _ = svc
        .execute(CompleteReservation {
            reservation_id: early.id,
        })
        .await
        .unwrap();
    _ = svc
        .execute(CancelReservation {
            reservation_id: cancelled.id,
        })
        .await
        .unwrap();

    let active = svc
        .execute(query::reservations::Active::by(read::reservation::Active))
        .await
        .unwrap();

    let ids = active.iter().map(|o| o.reservation.id).collect::<Vec<_>>();
    assert_eq!(ids, [late.id, early.id]);
    assert_eq!(active[0].guest_full_name(), "Jane Doe");
    let numbers = active[0]
        .room_numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(numbers, ["101", "201"]);
    assert_eq!(active[1].reservation.status, reservation::Status::Completed);
}

#[tokio::test]
async fn books_same_room_concurrently_only_once() {
    let (svc, r101, _, guest) = hotel().await;

    let (a, b) = future::join(
        book(&svc, guest.id, &[r101.id], "2026-03-01", "2026-03-04"),
        book(&svc, guest.id, &[r101.id], "2026-03-03", "2026-03-05"),
    )
    .await;

    assert!(a.is_ok() != b.is_ok(), "exactly one booking must succeed");
    let err = a.err().or(b.err()).unwrap();
    assert!(matches!(
        err.as_ref(),
        book_rooms::ExecutionError::RoomUnavailable(id) if *id == r101.id,
    ));
}

#[tokio::test]
async fn keeps_catalog_and_guests_unique() {
    let (svc, r101, _, _) = hotel().await;

    let err = svc
        .execute(RegisterGuest {
            first_name: guest::Name::new("John").unwrap(),
            last_name: guest::Name::new("Smith").unwrap(),
            email: guest::Email::new("jane@example.com").unwrap(),
            phone: guest::Phone::new("555-0199").unwrap(),
            address: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        register_guest::ExecutionError::EmailOccupied(_),
    ));
    let guests = svc.execute(query::guests::All::by(())).await.unwrap();
    assert_eq!(guests.len(), 1);

    let err = svc
        .execute(CreateRoomType {
            name: room_type::Name::new("Standard").unwrap(),
            base_price: Money::from_str("120USD").unwrap(),
            capacity: room_type::Capacity::new(3).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_room_type::ExecutionError::NameOccupied(_),
    ));

    let err = svc
        .execute(CreateRoom {
            number: room::Number::new("101").unwrap(),
            room_type_id: r101.room_type_id,
            floor: room::Floor::from(2),
            status: room::Status::Available,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_room::ExecutionError::NumberOccupied(_),
    ));

    let unknown = room_type::Id::new();
    let err = svc
        .execute(CreateRoom {
            number: room::Number::new("102").unwrap(),
            room_type_id: unknown,
            floor: room::Floor::from(1),
            status: room::Status::Available,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_room::ExecutionError::RoomTypeNotExists(id) if *id == unknown,
    ));

    let err = svc
        .execute(CreateRoomType {
            name: room_type::Name::new("Free").unwrap(),
            base_price: Money::from_str("-1USD").unwrap(),
            capacity: room_type::Capacity::new(1).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_room_type::ExecutionError::NegativePrice(_),
    ));
}

/// Books the provided rooms for `nights` starting `offset` days after
/// `2026-03-01`.
fn stay_booking(
    guest_id: guest::Id,
    room_ids: &[room::Id],
    offset: i64,
    nights: i64,
) -> BookRooms {
    let base: common::Date = date("2026-03-01");
    BookRooms {
        guest_id,
        room_ids: room_ids.to_vec(),
        check_in: base.checked_add_days(offset).unwrap().coerce(),
        check_out: base.checked_add_days(offset + nights).unwrap().coerce(),
    }
}

fn stay_of(cmd: &BookRooms) -> reservation::Stay {
    reservation::Stay::new(cmd.check_in, cmd.check_out).unwrap()
}

/// Asserts no two confirmed [`Reservation`]s out of the provided ones hold
/// the same room on the same night.
async fn assert_no_double_booking(svc: &Svc, ids: &[reservation::Id]) {
    let mut confirmed = Vec::new();
    for id in ids {
        let res = svc
            .execute(query::reservation::ById::by(*id))
            .await
            .unwrap()
            .unwrap();
        if res.status == reservation::Status::Confirmed {
            confirmed.push(res);
        }
    }

    for (i, a) in confirmed.iter().enumerate() {
        for b in &confirmed[i + 1..] {
            let shared = a.room_ids.iter().any(|r| b.room_ids.contains(r));
            assert!(
                !(shared && a.stay.overlaps(&b.stay)),
                "`{}` and `{}` hold the same room for {:?} and {:?}",
                a.id,
                b.id,
                a.stay,
                b.stay,
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn books_overlapping_stays_in_parallel_without_double_booking() {
    let (svc, r101, _, guest) = hotel().await;

    // Every stay shares a night with its neighbours.
    let bookings = (0..64)
        .map(|day| stay_booking(guest.id, &[r101.id], day, 2))
        .collect::<Vec<_>>();
    let stays = bookings.iter().map(stay_of).collect::<Vec<_>>();
    let tasks = bookings
        .into_iter()
        .map(|cmd| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.execute(cmd).await })
        })
        .collect::<Vec<_>>();

    let mut booked = Vec::new();
    let mut rejected = Vec::new();
    for (stay, res) in stays.into_iter().zip(future::join_all(tasks).await) {
        match res.unwrap() {
            Ok(r) => booked.push(r),
            Err(e) => {
                assert!(
                    matches!(
                        e.as_ref(),
                        book_rooms::ExecutionError::RoomUnavailable(id)
                            if *id == r101.id,
                    ),
                    "unexpected error: {e}",
                );
                rejected.push(stay);
            }
        }
    }

    assert!(!booked.is_empty());
    assert!(booked.len() <= 32, "{} stays booked", booked.len());
    assert_eq!(booked.len() + rejected.len(), 64);
    // Nothing is cancelled, so whatever blocked a rejected stay is kept.
    for stay in &rejected {
        assert!(
            booked.iter().any(|r| r.stay.overlaps(stay)),
            "{stay:?} was rejected with the room free",
        );
    }
    let ids = booked.iter().map(|r| r.id).collect::<Vec<_>>();
    assert_no_double_booking(&svc, &ids).await;

    let active = svc
        .execute(query::reservations::Active::by(read::reservation::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), booked.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn books_same_stay_in_parallel_only_once() {
    let (svc, r101, r201, guest) = hotel().await;

    let tasks = (0..32)
        .map(|_| {
            let svc = svc.clone();
            let cmd = stay_booking(guest.id, &[r201.id, r101.id], 10, 3);
            tokio::spawn(async move { svc.execute(cmd).await })
        })
        .collect::<Vec<_>>();
    let results = future::join_all(tasks)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect::<Vec<_>>();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(
                err.as_ref(),
                book_rooms::ExecutionError::RoomUnavailable(_),
            ),
            "unexpected error: {err}",
        );
    }
    assert!(available(&svc, "2026-03-11", "2026-03-14").await.is_empty());
}

#[tokio::test]
async fn never_double_books_over_sequence_of_bookings_and_cancellations() {
    let (svc, r101, r201, guest) = hotel().await;
    let standard = r101.room_type_id;
    let r102 = room(&svc, "102", standard).await;
    let rooms = [r101.id, r102.id, r201.id];

    // Deterministic pseudo-random sequence, so failures are reproducible.
    let mut seed = 0x2545_f491_u64;
    let mut next = |bound: u64| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    let mut ids = Vec::new();
    let (mut booked, mut refused, mut cancelled) = (0, 0, 0);
    for step in 0..300 {
        if !ids.is_empty() && next(4) == 0 {
            let pick = usize::try_from(next(ids.len() as u64)).unwrap();
            match svc
                .execute(CancelReservation {
                    reservation_id: ids[pick],
                })
                .await
            {
                Ok(_) => cancelled += 1,
                Err(e) => assert!(
                    matches!(
                        e.as_ref(),
                        transit_reservation::ExecutionError::InvalidStatusTransition {
                            ..
                        },
                    ),
                    "unexpected error: {e}",
                ),
            }
        } else {
            let chosen = rooms
                .iter()
                .copied()
                .filter(|_| next(2) == 0)
                .collect::<Vec<_>>();
            let chosen = if chosen.is_empty() {
                vec![rooms[usize::try_from(next(3)).unwrap()]]
            } else {
                chosen
            };
            let offset = i64::try_from(next(40)).unwrap();
            let nights = i64::try_from(next(5)).unwrap() + 1;
            let cmd = stay_booking(guest.id, &chosen, offset, nights);
            let stay = stay_of(&cmd);

            let free = available(
                &svc,
                &stay.check_in().to_string(),
                &stay.check_out().to_string(),
            )
            .await;
            let expected = chosen.iter().all(|r| free.contains(r));

            match svc.execute(cmd).await {
                Ok(res) => {
                    assert!(expected, "booked {chosen:?} reported busy");
                    ids.push(res.id);
                    booked += 1;
                }
                Err(e) => {
                    assert!(!expected, "refused {chosen:?} reported free");
                    assert!(
                        matches!(
                            e.as_ref(),
                            book_rooms::ExecutionError::RoomUnavailable(_),
                        ),
                        "unexpected error: {e}",
                    );
                    refused += 1;
                }
            }
        }

        if step % 50 == 49 {
            assert_no_double_booking(&svc, &ids).await;
        }
    }

    assert_no_double_booking(&svc, &ids).await;
    assert!(booked > 0 && refused > 0 && cancelled > 0);
}

#[tokio::test]
async fn rejects_prices_not_fitting_stored_precision() {
    let svc = Service::new(Memory::new());

    for price in ["50000000000000000000000000000USD", "1000000000000000USD"] {
        let err = svc
            .execute(CreateRoomType {
                name: room_type::Name::new("Palace").unwrap(),
                base_price: Money::from_str(price).unwrap(),
                capacity: room_type::Capacity::new(2).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(
                err.as_ref(),
                create_room_type::ExecutionError::PriceOutOfRange(_),
            ),
            "unexpected error for `{price}`: {err}",
        );
    }

    let err = svc
        .execute(CreateRoomType {
            name: room_type::Name::new("Palace").unwrap(),
            base_price: Money::from_str("99.99999USD").unwrap(),
            capacity: room_type::Capacity::new(2).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_room_type::ExecutionError::PriceOutOfRange(_),
    ));

    let id = room_type(&svc, "Palace", "999999999999999.9999USD").await;
    let stored = svc
        .execute(query::room_types::ById::by(id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.base_price,
        Money::from_str("999999999999999.9999USD").unwrap(),
    );
    let all = svc.execute(query::room_types::All::by(())).await.unwrap();
    assert_eq!(all.len(), 1, "rejected prices must not be stored");
}

#[tokio::test]
async fn orders_rooms_by_number_bytewise() {
    let svc = Service::new(Memory::new());
    let standard = room_type(&svc, "Standard", "100USD").await;
    for number in ["a1", "9", "B1", "10"] {
        _ = room(&svc, number, standard).await;
    }

    let search = svc
        .execute(FindAvailableRooms {
            check_in: date("2026-03-01"),
            check_out: date("2026-03-02"),
        })
        .await
        .unwrap();
    let numbers = search
        .rooms()
        .iter()
        .map(|l| l.room.number.to_string())
        .collect::<Vec<_>>();
    assert_eq!(numbers, ["10", "9", "B1", "a1"]);

    let listed = svc
        .execute(query::rooms::ByStatus::by(room::Status::Available))
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.room.number.to_string())
        .collect::<Vec<_>>();
    assert_eq!(listed, numbers);
}
