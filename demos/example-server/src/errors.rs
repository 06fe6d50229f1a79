use thiserror::Error;

#[derive(Debug, Error)]
#[error("list index {index} out of range")]
pub struct IndexError {
    pub index: usize,
}

#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error)]
#[error("can only concatenate str (not \"{0}\") to str")]
pub struct TypeError(pub &'static str);

#[derive(Debug, Error)]
#[error("quota exceeded: {used}/{limit}")]
pub struct QuotaError {
    pub used: u32,
    pub limit: u32,
}
