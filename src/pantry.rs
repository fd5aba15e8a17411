//! Despensa de la cafetera, compartida por todos los dispensers.
//!
//! Las cantidades solo se descuentan a traves de `try_consume`, que verifica
//! y descuenta toda la receta bajo un unico lock. Asi dos pedidos concurrentes
//! nunca pueden gastar las mismas unidades de un ingrediente.
use std::{collections::HashMap, sync::Mutex};

use log::{debug, info};

use crate::{container::Container, errors::CoffeeMakerError, recipe::Recipe};

/// Resultado de intentar consumir una receta de la despensa
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// Se descontaron todos los ingredientes de la receta
    Consumed,
    /// Primer ingrediente que falta o no alcanza. No se desconto nada.
    Insufficient(String),
}

impl ConsumeOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, ConsumeOutcome::Consumed)
    }
}

/// Despensa: ingrediente -> contenedor
pub struct Pantry {
    containers: Mutex<HashMap<String, Container>>,
}

impl Pantry {
    pub fn new() -> Pantry {
        Pantry {
            containers: Mutex::new(HashMap::new()),
        }
    }

    /// Agrega `amount` al ingrediente, creandolo si no existe
    pub fn restock(&self, name: &str, amount: u64) -> Result<(), CoffeeMakerError> {
        let mut containers = self.containers.lock()?;
        containers
            .entry(name.to_string())
            .and_modify(|container| container.refill(amount))
            .or_insert_with(|| Container::new(amount));
        debug!("[PANTRY] Restocked {} with {}", name, amount);
        Ok(())
    }

    /// Indica si el ingrediente es conocido, sin importar cuanto queda
    pub fn has_ingredient(&self, name: &str) -> Result<bool, CoffeeMakerError> {
        Ok(self.containers.lock()?.contains_key(name))
    }

    /// Indica si la despensa conoce todos los ingredientes de la receta.
    /// No mira las cantidades ni descuenta nada.
    pub fn has_all_ingredients(&self, recipe: &Recipe) -> Result<bool, CoffeeMakerError> {
        let containers = self.containers.lock()?;
        Ok(recipe
            .requirements()
            .iter()
            .all(|requirement| containers.contains_key(&requirement.name)))
    }

    /// Verifica que haya suficiente de cada ingrediente, en el orden de la receta,
    /// y si es asi descuenta todos. Si alguno no alcanza no se descuenta ninguno.
    pub fn try_consume(&self, recipe: &Recipe) -> Result<ConsumeOutcome, CoffeeMakerError> {
        let mut containers = self.containers.lock()?;

        for requirement in recipe.requirements() {
            let enough = containers
                .get(&requirement.name)
                .map_or(false, |container| container.has_at_least(requirement.quantity));
            if !enough {
                info!("[PANTRY] Not enough {}", requirement.name);
                return Ok(ConsumeOutcome::Insufficient(requirement.name.clone()));
            }
        }

        for requirement in recipe.requirements() {
            if let Some(container) = containers.get_mut(&requirement.name) {
                container.take(requirement.quantity);
                debug!(
                    "[PANTRY] Used {} of {}, remains {}",
                    requirement.quantity, requirement.name, container.remaining
                );
            }
        }
        Ok(ConsumeOutcome::Consumed)
    }

    pub fn remaining(&self, name: &str) -> Result<Option<u64>, CoffeeMakerError> {
        Ok(self
            .containers
            .lock()?
            .get(name)
            .map(|container| container.remaining))
    }

    /// Copia del estado de todos los contenedores, ordenada por ingrediente
    pub fn snapshot(&self) -> Result<Vec<(String, Container)>, CoffeeMakerError> {
        let containers = self.containers.lock()?;
        let mut snapshot: Vec<(String, Container)> = containers
            .iter()
            .map(|(name, container)| (name.clone(), *container))
            .collect();
        snapshot.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(snapshot)
    }

    pub fn clear(&self) -> Result<(), CoffeeMakerError> {
        self.containers.lock()?.clear();
        Ok(())
    }
}

impl Default for Pantry {
    fn default() -> Self {
        Pantry::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn latte() -> Recipe {
        Recipe::from_pairs(&[("coffee", 10), ("milk", 100)]).unwrap()
    }

    #[test]
    fn should_create_an_ingredient_when_restocking_an_unknown_one() {
        let pantry = Pantry::new();
        pantry.restock("milk", 100).unwrap();
        assert_eq!(Some(100), pantry.remaining("milk").unwrap());
    }

    #[test]
    fn should_add_to_an_existing_ingredient() {
        let pantry = Pantry::new();
        pantry.restock("milk", 100).unwrap();
        pantry.restock("milk", 50).unwrap();
        assert_eq!(Some(150), pantry.remaining("milk").unwrap());
    }

    #[test]
    fn should_know_an_ingredient_even_when_empty() {
        let pantry = Pantry::new();
        pantry.restock("sugar", 0).unwrap();
        assert_eq!(true, pantry.has_ingredient("sugar").unwrap());
        assert_eq!(false, pantry.has_ingredient("salt").unwrap());
    }

    #[test]
    fn should_consume_every_ingredient_of_the_recipe() {
        let pantry = Pantry::new();
        pantry.restock("coffee", 30).unwrap();
        pantry.restock("milk", 300).unwrap();

        assert_eq!(ConsumeOutcome::Consumed, pantry.try_consume(&latte()).unwrap());
        assert_eq!(Some(20), pantry.remaining("coffee").unwrap());
        assert_eq!(Some(200), pantry.remaining("milk").unwrap());
    }

    #[test]
    fn should_not_consume_anything_when_one_ingredient_is_not_enough() {
        let pantry = Pantry::new();
        pantry.restock("coffee", 30).unwrap();
        pantry.restock("milk", 99).unwrap();

        assert_eq!(
            ConsumeOutcome::Insufficient(String::from("milk")),
            pantry.try_consume(&latte()).unwrap()
        );
        assert_eq!(Some(30), pantry.remaining("coffee").unwrap());
        assert_eq!(Some(99), pantry.remaining("milk").unwrap());
    }

    #[test]
    fn should_report_a_missing_ingredient_as_insufficient() {
        let pantry = Pantry::new();
        pantry.restock("milk", 500).unwrap();

        assert_eq!(
            ConsumeOutcome::Insufficient(String::from("coffee")),
            pantry.try_consume(&latte()).unwrap()
        );
    }

    #[test]
    fn should_report_the_first_failing_ingredient_in_recipe_order() {
        let pantry = Pantry::new();
        let recipe = Recipe::from_pairs(&[("water", 10), ("tea", 5), ("sugar", 5)]).unwrap();
        pantry.restock("water", 10).unwrap();

        assert_eq!(
            ConsumeOutcome::Insufficient(String::from("tea")),
            pantry.try_consume(&recipe).unwrap()
        );
    }

    #[test]
    fn should_check_only_existence_for_has_all_ingredients() {
        let pantry = Pantry::new();
        pantry.restock("coffee", 0).unwrap();
        pantry.restock("milk", 0).unwrap();
        assert_eq!(true, pantry.has_all_ingredients(&latte()).unwrap());

        let mocha = Recipe::from_pairs(&[("coffee", 10), ("cacao", 10)]).unwrap();
        assert_eq!(false, pantry.has_all_ingredients(&mocha).unwrap());
    }

    #[test]
    fn should_never_consume_more_than_was_restocked_with_concurrent_requests() {
        let pantry = Arc::new(Pantry::new());
        pantry.restock("coffee", 1000).unwrap();
        pantry.restock("milk", 1050).unwrap();

        let handles: Vec<_> = (0..40)
            .map(|_| {
                let pantry_clone = pantry.clone();
                thread::spawn(move || pantry_clone.try_consume(&latte()).unwrap())
            })
            .collect();

        let outcomes: Vec<ConsumeOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        let consumed = outcomes.iter().filter(|o| o.is_consumed()).count();
        let insufficient = outcomes
            .iter()
            .filter(|o| **o == ConsumeOutcome::Insufficient(String::from("milk")))
            .count();

        assert_eq!(10, consumed);
        assert_eq!(30, insufficient);
        assert_eq!(Some(50), pantry.remaining("milk").unwrap());
        assert_eq!(Some(900), pantry.remaining("coffee").unwrap());
    }

    #[test]
    fn should_count_consumed_quantities_in_the_snapshot() {
        let pantry = Pantry::new();
        pantry.restock("milk", 200).unwrap();
        pantry.restock("coffee", 20).unwrap();
        pantry.try_consume(&latte()).unwrap();

        let snapshot = pantry.snapshot().unwrap();
        assert_eq!(
            vec![
                (String::from("coffee"), Container { remaining: 10, consumed: 10 }),
                (String::from("milk"), Container { remaining: 100, consumed: 100 }),
            ],
            snapshot
        );
    }

    #[test]
    fn should_be_empty_after_clear() {
        let pantry = Pantry::new();
        pantry.restock("milk", 200).unwrap();
        pantry.clear().unwrap();
        assert_eq!(false, pantry.has_ingredient("milk").unwrap());
    }
}
