//! City listing handler.

use tabled::Tabled;
use tickets_core::{City, Coordinator};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Code")]
    code: String,
}

impl From<&City> for CityRow {
    fn from(c: &City) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            country: c.country.clone(),
            code: c.country_code.clone(),
        }
    }
}

pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let cities = coordinator.get_cities().await;
    let out = output::render_list(&global.output, &cities, |c| CityRow::from(c), |c| c.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
