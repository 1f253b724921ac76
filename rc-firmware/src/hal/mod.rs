// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus rc-core,
// damit die Actuation-Logik auf dem Host testbar bleibt.

pub mod edge_input;
pub mod outputs;

pub use edge_input::{CHANNELS, RcInputs, install_edge_handler, now_micros};
pub use outputs::{GpioIndicator, LedcIntensity, LedcRgb, OutputInitError, init_ledc_outputs};
