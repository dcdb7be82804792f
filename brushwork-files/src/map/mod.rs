pub mod reader;
#[cfg(test)]
mod tests;
pub mod types;
