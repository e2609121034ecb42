#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let invocation = bookshelf_repo::interface::cli::parse_args(std::env::args().skip(1))?;
    bookshelf_repo::interface::cli::run(invocation).await
}
