mod export_xlsx;

pub use export_xlsx::XlsxSink;
