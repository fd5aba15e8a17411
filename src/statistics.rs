use std::{
    fmt,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use log::{error, info};

use crate::{
    coffee_maker::CoffeeMaker, constants::STATISTICS_WAIT_IN_MS, container::Container,
    errors::CoffeeMakerError,
};

/// Foto del estado de la cafetera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub prepared: u64,
    pub rejected: u64,
    pub outlets_in_use: usize,
    pub containers: Vec<(String, Container)>,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[STATISTICS] Prepared={} | Rejected={} | Outlets in use={} | Ingredient=(remaining, consumed) |",
            self.prepared, self.rejected, self.outlets_in_use
        )?;
        for (ingredient, container) in &self.containers {
            write!(
                f,
                " {}=({},{}) ",
                ingredient, container.remaining, container.consumed
            )?;
        }
        Ok(())
    }
}

/// Imprime periodicamente las estadisticas de la cafetera hasta que se le indica terminar
pub struct StatisticsPrinter {
    coffee_maker: Arc<CoffeeMaker>,
    finish: Arc<Mutex<bool>>,
}

impl StatisticsPrinter {
    pub fn new(coffee_maker: Arc<CoffeeMaker>) -> StatisticsPrinter {
        StatisticsPrinter {
            coffee_maker,
            finish: Arc::new(Mutex::new(false)),
        }
    }

    pub fn finish(&self) {
        if let Ok(mut finish) = self.finish.lock() {
            *finish = true;
            return;
        }
        error!("Error setting statistics thread to finish");
    }

    pub fn process_statistics(&self) -> Result<(), CoffeeMakerError> {
        loop {
            if *self.finish.lock()? {
                self.print_statistics()?;
                return Ok(());
            }

            self.print_statistics()?;

            thread::sleep(Duration::from_millis(STATISTICS_WAIT_IN_MS));
        }
    }

    fn print_statistics(&self) -> Result<(), CoffeeMakerError> {
        let statistics = self.coffee_maker.statistics()?;
        info!("{}", statistics);
        Ok(())
    }
}
