//! Control de admision a los dispensers (outlets) de la cafetera.
//!
//! Funciona como un semaforo contador con `capacity` permisos, armado con un
//! `Mutex` y una variable condicional. Los pedidos que no encuentran un dispenser
//! libre esperan en una cola de turnos, de forma que se atienden en orden de llegada
//! y ninguno se queda esperando para siempre.
use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard},
    time::Duration,
};

use log::{debug, info};
use serde::Deserialize;

use crate::errors::CoffeeMakerError;

/// Que hacer con un pedido cuando todos los dispensers estan ocupados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionPolicy {
    /// El pedido espera su turno
    Queue,
    /// El pedido se rechaza en el momento
    Reject,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        AdmissionPolicy::Queue
    }
}

struct OutletsState {
    available: usize,
    in_use: usize,
    peak_in_use: usize,
    waiting: VecDeque<u64>,
    next_ticket: u64,
}

impl OutletsState {
    fn is_turn_of(&self, ticket: u64) -> bool {
        self.available > 0 && self.waiting.front() == Some(&ticket)
    }

    fn take_outlet(&mut self) {
        self.available -= 1;
        self.in_use += 1;
        self.peak_in_use = self.peak_in_use.max(self.in_use);
    }

    fn leave_queue(&mut self, ticket: u64) {
        self.waiting.retain(|waiting_ticket| *waiting_ticket != ticket);
    }
}

/// Dispensers de la cafetera. Entrega un `OutletPermit` por cada dispenser tomado,
/// que lo devuelve al ser liberado (drop).
pub struct Outlets {
    capacity: usize,
    policy: AdmissionPolicy,
    state: Mutex<OutletsState>,
    outlet_freed: Condvar,
}

/// Permiso para usar un dispenser. Se devuelve al hacerle drop.
pub struct OutletPermit<'a> {
    outlets: &'a Outlets,
}

impl Drop for OutletPermit<'_> {
    fn drop(&mut self) {
        self.outlets.release();
    }
}

impl Outlets {
    pub fn new(capacity: usize, policy: AdmissionPolicy) -> Result<Outlets, CoffeeMakerError> {
        if capacity == 0 {
            return Err(CoffeeMakerError::InvalidConfiguration(String::from(
                "the machine needs at least one outlet",
            )));
        }
        Ok(Outlets {
            capacity,
            policy,
            state: Mutex::new(OutletsState {
                available: capacity,
                in_use: 0,
                peak_in_use: 0,
                waiting: VecDeque::new(),
                next_ticket: 0,
            }),
            outlet_freed: Condvar::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Toma un dispenser segun la politica configurada.
    /// Con `Reject` devuelve `None` si estan todos ocupados.
    pub fn admit(&self) -> Result<Option<OutletPermit<'_>>, CoffeeMakerError> {
        match self.policy {
            AdmissionPolicy::Queue => self.acquire().map(Some),
            AdmissionPolicy::Reject => self.try_acquire(),
        }
    }

    /// Espera hasta que haya un dispenser libre y lo toma
    pub fn acquire(&self) -> Result<OutletPermit<'_>, CoffeeMakerError> {
        // Sin timeout solo se sale de la espera con un permiso
        let permit = self.wait_for_outlet(None)?;
        permit.ok_or(CoffeeMakerError::LockError)
    }

    /// Igual que `acquire` pero espera como mucho `timeout`. Si se cumple el tiempo
    /// sale de la cola sin haber tomado ningun dispenser.
    pub fn acquire_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<OutletPermit<'_>>, CoffeeMakerError> {
        self.wait_for_outlet(Some(timeout))
    }

    /// Toma un dispenser solo si hay uno libre y nadie esperando antes
    pub fn try_acquire(&self) -> Result<Option<OutletPermit<'_>>, CoffeeMakerError> {
        let mut state = self.state.lock()?;
        if state.available > 0 && state.waiting.is_empty() {
            state.take_outlet();
            return Ok(Some(OutletPermit { outlets: self }));
        }
        info!("[OUTLETS] All {} outlets are busy", self.capacity);
        Ok(None)
    }

    /// Cantidad de dispensers en uso en este momento
    pub fn in_use(&self) -> Result<usize, CoffeeMakerError> {
        Ok(self.state.lock()?.in_use)
    }

    /// Maxima cantidad de dispensers que se usaron a la vez
    pub fn peak_in_use(&self) -> Result<usize, CoffeeMakerError> {
        Ok(self.state.lock()?.peak_in_use)
    }

    /// Cantidad de pedidos esperando un dispenser
    pub fn waiting(&self) -> Result<usize, CoffeeMakerError> {
        Ok(self.state.lock()?.waiting.len())
    }

    fn wait_for_outlet(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<OutletPermit<'_>>, CoffeeMakerError> {
        let mut state = self.state.lock()?;
        if state.available > 0 && state.waiting.is_empty() {
            state.take_outlet();
            return Ok(Some(OutletPermit { outlets: self }));
        }

        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.waiting.push_back(ticket);
        debug!(
            "[OUTLETS] Request {} waits, {} in queue",
            ticket,
            state.waiting.len()
        );

        state = match timeout {
            None => self
                .outlet_freed
                .wait_while(state, |state| !state.is_turn_of(ticket))?,
            Some(timeout) => {
                let (mut state, _) = self.outlet_freed.wait_timeout_while(
                    state,
                    timeout,
                    |state| !state.is_turn_of(ticket),
                )?;
                if !state.is_turn_of(ticket) {
                    state.leave_queue(ticket);
                    info!("[OUTLETS] Request {} gave up waiting", ticket);
                    // El siguiente de la cola puede haber quedado primero
                    self.outlet_freed.notify_all();
                    return Ok(None);
                }
                state
            }
        };

        state.waiting.pop_front();
        state.take_outlet();
        if state.available > 0 && !state.waiting.is_empty() {
            self.outlet_freed.notify_all();
        }
        debug!("[OUTLETS] Request {} takes an outlet", ticket);
        Ok(Some(OutletPermit { outlets: self }))
    }

    fn release(&self) {
        let mut state = self.lock_or_recover();
        state.available += 1;
        state.in_use -= 1;
        if !state.waiting.is_empty() {
            self.outlet_freed.notify_all();
        }
    }

    // Se usa desde Drop, donde no se puede propagar el error
    fn lock_or_recover(&self) -> MutexGuard<'_, OutletsState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
