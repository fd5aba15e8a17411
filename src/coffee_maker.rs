//! Cafetera. Atiende los pedidos de bebidas de forma concurrente.
//!
//! Cada pedido busca la receta en el menu, espera un dispenser libre, y con el
//! dispenser tomado intenta consumir los ingredientes de la despensa. El dispenser
//! se libera recien cuando termina de preparar la bebida (o cuando se rechaza).
use std::{
    sync::{Arc, RwLock},
    thread,
    time::Duration,
};

use log::{debug, info};

use crate::{
    config::Machine,
    errors::CoffeeMakerError,
    menu::BeverageMenu,
    outcome::{BrewOutcome, BrewRejection, MenuOutcome, MenuRejection},
    outlets::{AdmissionPolicy, OutletPermit, Outlets},
    pantry::{ConsumeOutcome, Pantry},
    recipe::Recipe,
    statistics::Statistics,
};

pub struct CoffeeMaker {
    pantry: Arc<Pantry>,
    menu: BeverageMenu,
    outlets: Outlets,
    prepared: RwLock<u64>,
    rejected: RwLock<u64>,
}

impl CoffeeMaker {
    /// Cafetera con la despensa y el menu vacios
    pub fn new(outlets: usize, policy: AdmissionPolicy) -> Result<CoffeeMaker, CoffeeMakerError> {
        CoffeeMaker::with_pantry(outlets, policy, Arc::new(Pantry::new()))
    }

    /// Cafetera que usa una despensa ya existente.
    /// Sirve para rearmar la cafetera con otra cantidad de dispensers sin perder el stock.
    pub fn with_pantry(
        outlets: usize,
        policy: AdmissionPolicy,
        pantry: Arc<Pantry>,
    ) -> Result<CoffeeMaker, CoffeeMakerError> {
        Ok(CoffeeMaker {
            pantry,
            menu: BeverageMenu::new(),
            outlets: Outlets::new(outlets, policy)?,
            prepared: RwLock::new(0),
            rejected: RwLock::new(0),
        })
    }

    /// Arma la cafetera a partir de la configuracion. Primero carga los ingredientes
    /// y despues las bebidas, sin verificar el stock.
    pub fn from_configuration(machine: &Machine) -> Result<CoffeeMaker, CoffeeMakerError> {
        let coffee_maker = CoffeeMaker::new(machine.outlets.count_n, machine.admission)?;
        for (ingredient, quantity) in &machine.total_items_quantity {
            coffee_maker.load_ingredient(ingredient, *quantity)?;
        }
        for (beverage, recipe) in machine.recipes()? {
            let outcome = coffee_maker.add_beverage(&beverage, recipe, false)?;
            if !outcome.is_success() {
                return Err(CoffeeMakerError::InvalidConfiguration(format!(
                    "{}: {}",
                    beverage, outcome
                )));
            }
        }
        info!(
            "[COFFEE MAKER] Ready with {} outlets ({:?} when busy) and {} beverages",
            coffee_maker.outlets.capacity(),
            coffee_maker.outlets.policy(),
            machine.beverages.len()
        );
        Ok(coffee_maker)
    }

    /// Prepara la bebida. Si no hay dispensers libres espera su turno
    /// (o se rechaza, segun la politica de admision).
    pub fn make_beverage(
        &self,
        beverage: &str,
        brew_time: Duration,
    ) -> Result<BrewOutcome, CoffeeMakerError> {
        self.brew(beverage, brew_time, None)
    }

    /// Igual que `make_beverage` pero espera un dispenser como mucho `max_wait`,
    /// sin importar la politica de admision.
    pub fn make_beverage_within(
        &self,
        beverage: &str,
        brew_time: Duration,
        max_wait: Duration,
    ) -> Result<BrewOutcome, CoffeeMakerError> {
        self.brew(beverage, brew_time, Some(max_wait))
    }

    fn brew(
        &self,
        beverage: &str,
        brew_time: Duration,
        max_wait: Option<Duration>,
    ) -> Result<BrewOutcome, CoffeeMakerError> {
        let recipe = match self.menu.recipe(beverage)? {
            Some(recipe) => recipe,
            None => return self.reject(beverage, BrewRejection::UnknownBeverage),
        };

        let _permit: OutletPermit = match self.take_outlet(max_wait)? {
            Some(permit) => permit,
            None if max_wait.is_some() => {
                return self.reject(beverage, BrewRejection::OutletWaitTimedOut)
            }
            None => return self.reject(beverage, BrewRejection::AllOutletsBusy),
        };
        debug!("[COFFEE MAKER] Checking stock for {}", beverage);

        if let ConsumeOutcome::Insufficient(ingredient) = self.pantry.try_consume(&recipe)? {
            return self.reject(beverage, BrewRejection::InsufficientIngredient(ingredient));
        }

        if !brew_time.is_zero() {
            thread::sleep(brew_time);
        }
        increase(&self.prepared)?;
        info!("[COFFEE MAKER] {} is prepared", beverage);
        Ok(BrewOutcome::Prepared {
            beverage: beverage.to_string(),
        })
    }

    fn take_outlet(
        &self,
        max_wait: Option<Duration>,
    ) -> Result<Option<OutletPermit<'_>>, CoffeeMakerError> {
        match max_wait {
            Some(max_wait) => self.outlets.acquire_timeout(max_wait),
            None => self.outlets.admit(),
        }
    }

    fn reject(
        &self,
        beverage: &str,
        reason: BrewRejection,
    ) -> Result<BrewOutcome, CoffeeMakerError> {
        increase(&self.rejected)?;
        let outcome = BrewOutcome::Rejected {
            beverage: beverage.to_string(),
            reason,
        };
        info!("[COFFEE MAKER] {}", outcome);
        Ok(outcome)
    }

    /// Agrega una bebida al menu. Con `verify_stock` se rechaza si la despensa
    /// no conoce alguno de los ingredientes. No toca la despensa.
    pub fn add_beverage(
        &self,
        beverage: &str,
        recipe: Recipe,
        verify_stock: bool,
    ) -> Result<MenuOutcome, CoffeeMakerError> {
        if self.menu.contains(beverage)? {
            return Ok(MenuOutcome::Rejected(MenuRejection::DuplicateBeverage));
        }
        if verify_stock && !self.pantry.has_all_ingredients(&recipe)? {
            info!("[MENU] Pantry can not supply {}", beverage);
            return Ok(MenuOutcome::Rejected(MenuRejection::UnsupportedRecipe));
        }
        if !self.menu.insert(beverage, recipe)? {
            return Ok(MenuOutcome::Rejected(MenuRejection::DuplicateBeverage));
        }
        info!("[MENU] Added {}", beverage);
        Ok(MenuOutcome::Added)
    }

    pub fn remove_beverage(&self, beverage: &str) -> Result<MenuOutcome, CoffeeMakerError> {
        if !self.menu.remove(beverage)? {
            return Ok(MenuOutcome::Rejected(
                MenuRejection::UnknownBeverageOnRemove,
            ));
        }
        info!("[MENU] Removed {}", beverage);
        Ok(MenuOutcome::Removed)
    }

    /// Carga `quantity` del ingrediente en la despensa
    pub fn load_ingredient(&self, ingredient: &str, quantity: u64) -> Result<(), CoffeeMakerError> {
        self.pantry.restock(ingredient, quantity)
    }

    pub fn beverages(&self) -> Result<Vec<String>, CoffeeMakerError> {
        self.menu.beverages()
    }

    pub fn remaining(&self, ingredient: &str) -> Result<Option<u64>, CoffeeMakerError> {
        self.pantry.remaining(ingredient)
    }

    pub fn outlets(&self) -> &Outlets {
        &self.outlets
    }

    pub fn statistics(&self) -> Result<Statistics, CoffeeMakerError> {
        Ok(Statistics {
            prepared: *self.prepared.read()?,
            rejected: *self.rejected.read()?,
            outlets_in_use: self.outlets.in_use()?,
            containers: self.pantry.snapshot()?,
        })
    }

    /// Vacia la despensa, el menu y los contadores
    pub fn clear(&self) -> Result<(), CoffeeMakerError> {
        self.pantry.clear()?;
        self.menu.clear()?;
        *self.prepared.write()? = 0;
        *self.rejected.write()? = 0;
        Ok(())
    }
}

fn increase(counter: &RwLock<u64>) -> Result<(), CoffeeMakerError> {
    let mut count = counter.write()?;
    *count += 1;
    Ok(())
}
