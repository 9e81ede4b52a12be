pub mod lookup;
pub mod reload;
pub mod search;

pub use lookup::*;
pub use reload::*;
pub use search::*;
