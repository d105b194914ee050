/// Validate that every stage is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating selector pipeline configuration");

    crate::logging::config::validate_config()?;
    crate::scanner::validate_scanner()?;
    crate::parser::validate_parser()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Selector pipeline validation succeeded",
        "stages_validated" => 2
    );

    Ok(())
}
