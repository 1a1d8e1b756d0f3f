pub mod health;
pub mod navigation;
pub mod permissions;
pub mod session;
pub mod sub_admins;

#[cfg(test)]
pub(crate) mod test_support;
