pub mod cascading_input;
pub mod option_select;
pub mod parameter_input;
pub mod parameters_panel;
pub mod query_based_input;

pub use cascading_input::CascadingParameterInput;
pub use option_select::OptionSelect;
pub use parameter_input::ParameterInput;
pub use parameters_panel::ParametersPanel;
pub use query_based_input::{OptionsLoader, QueryBasedParameterInput};
