use errors::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    help_center::runner::run().await
}
