use std::io;

use stockroom::presentation::write_dashboard;
use stockroom_app::context::AppContext;

pub(crate) async fn run(ctx: &AppContext) -> Result<(), String> {
    let mut controller = ctx.products_controller();
    let mut viewer = controller.subscribe();

    controller
        .refresh()
        .await
        .map_err(|error| error.to_string())?;

    let products = viewer.borrow_and_update().clone();

    write_dashboard(io::stdout().lock(), &products).map_err(|error| error.to_string())
}
