/// Contenedor de un ingrediente de la despensa.
/// Lleva la cantidad que queda y la que se fue consumiendo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub remaining: u64,
    pub consumed: u64,
}

impl Container {
    pub fn new(initial_capacity: u64) -> Container {
        Container {
            remaining: initial_capacity,
            consumed: 0,
        }
    }

    pub fn has_at_least(&self, quantity: u64) -> bool {
        self.remaining >= quantity
    }

    pub fn refill(&mut self, quantity: u64) {
        self.remaining = self.remaining.saturating_add(quantity);
    }

    /// Solo se llama despues de verificar con `has_at_least`
    pub(crate) fn take(&mut self, quantity: u64) {
        debug_assert!(self.has_at_least(quantity));
        self.remaining -= quantity;
        self.consumed += quantity;
    }
}
