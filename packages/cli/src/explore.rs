//! Terminal explorer driving the reactive dashboard controller.
//!
//! Each pick of a selector value is fed to the controller as a control
//! event; the recomputed group is printed as JSON.

use bcn_rent_dataset::DataStore;
use bcn_rent_view::DashboardController;
use bcn_rent_view_models::{ControlEvent, ControlOption, FilterGroup, controls};
use dialoguer::Select;

enum Control {
    Year,
    District,
    Unit,
    Quit,
}

impl Control {
    const ALL: &[Self] = &[Self::Year, Self::District, Self::Unit, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Year => "Change year (map)",
            Self::District => "Change district (trend)",
            Self::Unit => "Change unit (trend)",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the explorer until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or a view cannot be serialized.
pub fn run(store: &DataStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = DashboardController::new(store);
    let surface = controls();

    print_group(&controller, FilterGroup::Map)?;
    print_group(&controller, FilterGroup::Trend)?;

    let labels: Vec<&str> = Control::ALL.iter().map(Control::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("Which control?")
            .items(&labels)
            .default(0)
            .interact()?;

        let event = match Control::ALL[idx] {
            Control::Year => {
                let current = controller.map_filter().year();
                ControlEvent::Year(pick("Year", &surface.years, &current)?)
            }
            Control::District => {
                let current = controller.trend_filter().district;
                ControlEvent::District(pick("District", &surface.districts, &current)?)
            }
            Control::Unit => {
                let current = controller.trend_filter().unit;
                ControlEvent::Unit(pick("Unit", &surface.units, &current)?)
            }
            Control::Quit => break,
        };

        match controller.handle(event) {
            Ok(group) => print_group(&controller, group)?,
            Err(e) => log::warn!("Ignoring control event: {e}"),
        }
    }

    Ok(())
}

fn pick<T: Copy + PartialEq>(
    prompt: &str,
    options: &[ControlOption<T>],
    current: &T,
) -> Result<T, dialoguer::Error> {
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    let default = options
        .iter()
        .position(|o| o.value == *current)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(options[idx].value)
}

fn print_group(
    controller: &DashboardController<'_>,
    group: FilterGroup,
) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&controller.view(group))?);
    Ok(())
}
