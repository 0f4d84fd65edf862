pub mod category;
pub mod constants;
pub mod run_logger;

#[cfg(test)]
pub mod test_server;
