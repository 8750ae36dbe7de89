use crate::roster::RosterEntry;
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn format(synced: usize, profile_failed: usize, account_failed: usize) -> Self {
        match (synced, profile_failed, account_failed) {
            (s, p, a) if p > 0 || a > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!(
                    "{} synced, {} without profile, {} failed",
                    s.green(),
                    p.yellow(),
                    a.red()
                ),
            },
            (s, _, _) if s > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} member(s) imported", s.green()),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: "No members in roster".to_string(),
            },
        }
    }
}

/// 行単位の進捗出力
///
/// エラーと警告は `err` へ、それ以外は `out` へ書く。
/// 書き込みエラーは無視し、パイプが閉じてもインポートは中断しない。
pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    show_summary: bool,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            show_summary: false,
        }
    }

    /// 終了前に件数サマリーを出すかどうか（`--verbose` 時のみ）
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn start(&mut self, count: usize) {
        let _ = writeln!(self.out, "Starting import of {} member(s)...", count);
    }

    pub fn processing(&mut self, entry: &RosterEntry, email: &str) {
        let _ = writeln!(
            self.out,
            "Processing: {} - {} ({})",
            entry.identifier, entry.display_name, email
        );
    }

    pub fn account_created(&mut self, account_id: &str) {
        let _ = writeln!(
            self.out,
            "  {} Account created. ID: {}",
            "✓".green(),
            account_id
        );
    }

    pub fn account_failed(&mut self, identifier: &str, message: &str) {
        let _ = writeln!(
            self.err,
            "  {} Error creating account for {}: {}",
            "✗".red(),
            identifier,
            message
        );
    }

    pub fn profile_synced(&mut self) {
        let _ = writeln!(self.out, "  {} Profile synced.", "✓".green());
    }

    pub fn profile_failed(&mut self, identifier: &str, message: &str) {
        let _ = writeln!(
            self.err,
            "  {} Error syncing profile for {}: {}",
            "⚠".yellow(),
            identifier,
            message
        );
    }

    /// dry-run 用の行（送信はしない）
    pub fn planned(&mut self, entry: &RosterEntry, email: &str) {
        let _ = writeln!(
            self.out,
            "  - {} - {} -> {}",
            entry.identifier, entry.display_name, email
        );
    }

    pub fn summary(&mut self, summary: &CommandSummary) {
        if !self.show_summary {
            return;
        }
        let _ = writeln!(self.out, "\n{} {}", summary.prefix, summary.message);
    }

    pub fn finished(&mut self) {
        let _ = writeln!(self.out, "--- Process finished ---");
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

#[cfg(test)]
pub mod testing {
    use super::Console;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// clone 可能なメモリ上の writer
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Console と、その stdout / stderr バッファ
    pub fn buffered_console() -> (Console, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        (Console::new(out.clone(), err.clone()), out, err)
    }
}
