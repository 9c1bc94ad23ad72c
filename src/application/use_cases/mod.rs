/// Use cases module containing application business logic orchestration
mod fetch_bom;

pub use fetch_bom::FetchBomUseCase;
