pub mod doc_export;
