use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::models::TransactionSource;
use crate::settings::get_data_dir;
use crate::store::ExpenseStore;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let db_path = data_dir.join("penny.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = open_store()?;
        let total = store.list_records()?.len();
        let manual = store.count_by_source(TransactionSource::Manual)?;
        let imported = store.count_by_source(TransactionSource::Imported)?;

        println!();
        println!("Expenses:   {total}");
        println!("  manual:   {manual}");
        println!("  imported: {imported}");
    } else {
        println!();
        println!("Database not found. Run `penny init` to set up.");
    }

    Ok(())
}
