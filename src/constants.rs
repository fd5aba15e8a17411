//! Parametros de configuracion de la simulacion

/// Archivo con la descripcion de la cafetera, si no se pasa otro por parametro
pub const DEFAULT_CONFIGURATION_PATH: &str = "machine.json";

/// Cantidad de pedidos que se hacen de cada bebida del menu
pub const REQUESTS_PER_BEVERAGE: usize = 3;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir por pantalla las estadisticas de la cafetera
pub const STATISTICS_WAIT_IN_MS: u64 = 50;

/// Nivel de log por defecto. Se puede cambiar con la variable de entorno `RUST_LOG`
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
