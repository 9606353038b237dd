use crate::commands::quotes::list_result;
use crate::commands::{open_desk, CommandResult};

pub fn run(search: Option<&str>) -> CommandResult {
    let session = match open_desk("invoices.list") {
        Ok(session) => session,
        Err(result) => return result,
    };

    let listed = session.runtime.block_on(session.desk.list_invoices(search));
    list_result("invoices.list", "invoice", listed)
}
