mod row;

pub use row::RecordRow;
