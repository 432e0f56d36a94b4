//! ファイル操作モジュール
//!
//! - プレーンテキストのみ（ヘッダなし、エンコーディング判定なし）
//! - 保存時にファイル名が `.txt` を含まなければ付与
//! - ファイルダイアログは `.txt` とディレクトリのみ表示

pub mod io;
pub mod path;

pub use io::{read_text, write_text, FileOperations, TextFileOperations};
pub use path::{ensure_txt_extension, expand_input, is_text_file, TEXT_EXTENSION, TEXT_SUFFIX};
