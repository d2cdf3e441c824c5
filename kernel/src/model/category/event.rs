#[derive(Debug)]
pub struct CreateCategory {
    pub name: String,
    pub description: String,
    pub color: String,
}
