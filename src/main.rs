use std::{env, process, sync::Arc, thread, time::Duration};

use log::{error, info};
use rand::{seq::SliceRandom, thread_rng};
use simple_logger::SimpleLogger;

use coffee_machine::{
    coffee_maker::CoffeeMaker,
    config::read_configuration_from_file,
    constants::{DEFAULT_CONFIGURATION_PATH, LOG_LEVEL, REQUESTS_PER_BEVERAGE},
    errors::CoffeeMakerError,
    statistics::StatisticsPrinter,
};

fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LOG_LEVEL).env().init() {
        eprintln!("Could not start the logger: {}", err);
    }

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIGURATION_PATH.to_string());
    if let Err(err) = run(&path) {
        error!("[COFFEE MAKER] {}", err);
        process::exit(1);
    }
}

fn run(path: &str) -> Result<(), CoffeeMakerError> {
    let configuration = read_configuration_from_file(path)?;
    let brew_time = Duration::from_millis(configuration.machine.brew_time_in_ms);
    let coffee_maker = Arc::new(CoffeeMaker::from_configuration(&configuration.machine)?);

    let statistics_printer = Arc::new(StatisticsPrinter::new(coffee_maker.clone()));
    let statistics_printer_clone = statistics_printer.clone();
    let statistics_thread = thread::spawn(move || statistics_printer_clone.process_statistics());

    let mut requests: Vec<String> = coffee_maker
        .beverages()?
        .into_iter()
        .flat_map(|beverage| std::iter::repeat(beverage).take(REQUESTS_PER_BEVERAGE))
        .collect();
    requests.shuffle(&mut thread_rng());

    let request_threads: Vec<_> = requests
        .into_iter()
        .map(|beverage| {
            let coffee_maker_clone = coffee_maker.clone();
            thread::spawn(move || coffee_maker_clone.make_beverage(&beverage, brew_time))
        })
        .collect();

    for request in request_threads {
        match request.join() {
            Ok(Ok(outcome)) => info!("[CUSTOMER] {}", outcome),
            Ok(Err(err)) => error!("[CUSTOMER] Request failed: {}", err),
            Err(_) => error!("[CUSTOMER] Request thread panicked"),
        }
    }

    statistics_printer.finish();
    match statistics_thread.join() {
        Ok(result) => result,
        Err(_) => Err(CoffeeMakerError::LockError),
    }
}
