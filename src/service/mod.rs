//! Business rules for employee records.

mod employee;

#[cfg(test)]
mod tests;

pub use employee::EmployeeService;
