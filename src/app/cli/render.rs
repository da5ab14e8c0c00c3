use crate::app::config::ProvisionInputs;
use crate::domain::AppError;

pub(super) fn run_render(inputs: ProvisionInputs) -> Result<(), AppError> {
    let file = crate::render(&inputs)?;
    print!("{}", file.content);
    Ok(())
}
