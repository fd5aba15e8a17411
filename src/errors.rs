//! Errores fatales de la cafetera.
use std::fmt;

/// Errores que no son un resultado esperado de un pedido.
/// Se propagan hacia arriba sin modificarse.
#[derive(Debug, PartialEq, Eq)]
pub enum CoffeeMakerError {
    LockError,
    FileReaderError,
    InvalidConfiguration(String),
    DuplicateIngredient(String),
}

impl<T> From<std::sync::PoisonError<T>> for CoffeeMakerError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoffeeMakerError::LockError
    }
}

impl fmt::Display for CoffeeMakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeMakerError::LockError => write!(f, "a lock of the coffee maker was poisoned"),
            CoffeeMakerError::FileReaderError => write!(f, "could not read the configuration file"),
            CoffeeMakerError::InvalidConfiguration(reason) => {
                write!(f, "machine configurations are not correct: {}", reason)
            }
            CoffeeMakerError::DuplicateIngredient(name) => {
                write!(f, "ingredient {} appears more than once in the recipe", name)
            }
        }
    }
}

impl std::error::Error for CoffeeMakerError {}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::*;

    #[test]
    fn should_convert_a_poisoned_lock_into_lock_error() {
        let lock = Arc::new(Mutex::new(0));
        let lock_clone = lock.clone();
        let _ = thread::spawn(move || {
            let _guard = lock_clone.lock();
            panic!("poisoning the lock");
        })
        .join();

        let result: Result<(), CoffeeMakerError> = lock.lock().map(|_| ()).map_err(|e| e.into());
        assert_eq!(Err(CoffeeMakerError::LockError), result);
    }

    #[test]
    fn should_describe_the_invalid_configuration() {
        let error = CoffeeMakerError::InvalidConfiguration(String::from("outlets must be positive"));
        assert_eq!(
            "machine configurations are not correct: outlets must be positive",
            error.to_string()
        );
    }
}
