pub type Result<T> = anyhow::Result<T>;
