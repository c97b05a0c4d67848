pub mod checks;
pub mod mesh;
pub mod mock_kernel;
pub mod part;
pub mod primitives;
pub mod tessellation;
pub mod traits;
pub mod truck_kernel;
pub mod types;

pub use mesh::check_closed;
pub use mock_kernel::{MockFailure, MockKernel, MockOp};
pub use part::{Part, Primitive};
pub use traits::*;
pub use truck_kernel::TruckKernel;
pub use types::*;
