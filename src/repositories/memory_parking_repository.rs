//! Repositorio en memoria
//!
//! Mismas reglas que el repositorio PostgreSQL, con todas las tablas
//! detrás de un único mutex. Se usa para ejecutar el servicio sin base de
//! datos (`PARKING_STORE=memory`) y en las pruebas de la API.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{
    NewParkingSpot, NewReservation, ParkingSpot, ParkingSpotUpdate, Reservation,
    ReservationUpdate,
};
use crate::repositories::{
    occupancy_mismatch, spot_has_reservations, spot_occupied, ParkingRepository,
};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Debug, Default)]
struct Tables {
    spots: BTreeMap<i32, ParkingSpot>,
    reservations: BTreeMap<i32, Reservation>,
    last_spot_id: i32,
    last_reservation_id: i32,
}

impl Tables {
    fn reservation_count(&self, spot_id: i32) -> usize {
        self.reservations
            .values()
            .filter(|r| r.spot_id == spot_id)
            .count()
    }

    fn spot_number_taken(&self, spot_number: &str, except_id: Option<i32>) -> bool {
        self.spots
            .values()
            .any(|s| s.spot_number == spot_number && Some(s.id) != except_id)
    }

    fn set_occupied(&mut self, spot_id: i32, occupied: bool) {
        if let Some(spot) = self.spots.get_mut(&spot_id) {
            spot.is_occupied = occupied;
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryParkingRepository {
    tables: Mutex<Tables>,
}

impl MemoryParkingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParkingRepository for MemoryParkingRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_spots(&self) -> AppResult<Vec<ParkingSpot>> {
        let tables = self.tables.lock().await;
        Ok(tables.spots.values().cloned().collect())
    }

    async fn create_spot(&self, spot: NewParkingSpot) -> AppResult<ParkingSpot> {
        let mut tables = self.tables.lock().await;

        if tables.spot_number_taken(&spot.spot_number, None) {
            return Err(conflict_error("Parking spot", "spot_number", &spot.spot_number));
        }

        tables.last_spot_id += 1;
        let created = ParkingSpot {
            id: tables.last_spot_id,
            spot_number: spot.spot_number,
            is_occupied: false,
        };
        tables.spots.insert(created.id, created.clone());

        info!(spot_id = created.id, spot_number = %created.spot_number, "Parking spot created");
        Ok(created)
    }

    async fn update_spot(&self, id: i32, update: ParkingSpotUpdate) -> AppResult<ParkingSpot> {
        let mut tables = self.tables.lock().await;

        if !tables.spots.contains_key(&id) {
            return Err(not_found_error("Parking spot", id));
        }
        if tables.spot_number_taken(&update.spot_number, Some(id)) {
            return Err(conflict_error("Parking spot", "spot_number", &update.spot_number));
        }
        if let Some(requested) = update.is_occupied {
            let has_reservations = tables.reservation_count(id) > 0;
            if requested != has_reservations {
                return Err(occupancy_mismatch(requested));
            }
        }

        let spot = tables
            .spots
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Parking spot", id))?;
        spot.spot_number = update.spot_number;
        if let Some(requested) = update.is_occupied {
            spot.is_occupied = requested;
        }

        info!(spot_id = id, "Parking spot updated");
        Ok(spot.clone())
    }

    async fn delete_spot(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;

        if !tables.spots.contains_key(&id) {
            return Err(not_found_error("Parking spot", id));
        }
        if tables.reservation_count(id) > 0 {
            return Err(spot_has_reservations());
        }

        tables.spots.remove(&id);
        info!(spot_id = id, "Parking spot deleted");
        Ok(())
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let tables = self.tables.lock().await;
        Ok(tables.reservations.values().cloned().collect())
    }

    async fn book(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;

        let spot = tables
            .spots
            .get(&reservation.spot_id)
            .ok_or_else(|| not_found_error("Parking spot", reservation.spot_id))?;
        if spot.is_occupied {
            return Err(spot_occupied());
        }

        tables.last_reservation_id += 1;
        let created = Reservation {
            id: tables.last_reservation_id,
            name: reservation.name,
            car_number: reservation.car_number,
            spot_id: reservation.spot_id,
            start_time: reservation.start_time,
            duration: reservation.duration,
        };
        tables.reservations.insert(created.id, created.clone());
        tables.set_occupied(created.spot_id, true);

        info!(reservation_id = created.id, spot_id = created.spot_id, "Parking spot reserved");
        Ok(created)
    }

    async fn update_reservation(&self, update: ReservationUpdate) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;

        let previous_spot = tables
            .reservations
            .get(&update.id)
            .map(|r| r.spot_id)
            .ok_or_else(|| not_found_error("Reservation", update.id))?;

        let moved = previous_spot != update.spot_id;
        if moved {
            let target = tables
                .spots
                .get(&update.spot_id)
                .ok_or_else(|| not_found_error("Parking spot", update.spot_id))?;
            if target.is_occupied {
                return Err(spot_occupied());
            }
        }

        let updated = Reservation {
            id: update.id,
            name: update.name,
            car_number: update.car_number,
            spot_id: update.spot_id,
            start_time: update.start_time,
            duration: update.duration,
        };
        tables.reservations.insert(updated.id, updated.clone());

        if moved {
            tables.set_occupied(updated.spot_id, true);
            if tables.reservation_count(previous_spot) == 0 {
                tables.set_occupied(previous_spot, false);
            }
        }

        info!(reservation_id = updated.id, spot_id = updated.spot_id, moved, "Reservation updated");
        Ok(updated)
    }

    async fn delete_reservation(&self, id: i32) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;

        let existing = tables
            .reservations
            .remove(&id)
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if tables.reservation_count(existing.spot_id) == 0 {
            tables.set_occupied(existing.spot_id, false);
        }

        info!(reservation_id = id, spot_id = existing.spot_id, "Reservation deleted");
        Ok(existing)
    }
}
