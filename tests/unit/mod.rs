mod batch_tests;
mod implied_volatility_tests;
mod records_tests;
mod root_finding_tests;
mod transient_tests;
