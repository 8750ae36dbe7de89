//! 名簿インポーター
//!
//! 名簿の各エントリを先頭から順に処理する。まず認証サービスでアカウントを作成し、
//! 次に新しいアカウントIDをキーにプロファイルを upsert する。
//! 1件の失敗でバッチ全体が止まることはない。

use crate::config::ImportOptions;
use crate::error::PadronError;
use crate::identity::{IdentityService, NewAccount};
use crate::output::{CommandSummary, Console};
use crate::roster::RosterEntry;
use crate::store::{ProfileRecord, ProfileStore};

/// エントリ1件の最終状態
#[derive(Debug)]
pub enum EntryOutcome {
    /// アカウント作成とプロファイル upsert の両方が成功
    Synced { account_id: String },
    /// アカウント作成に失敗（upsert は実行しない）
    AccountFailed { error: PadronError },
    /// アカウントは作成済みだがプロファイルを書き込めなかった
    ProfileFailed {
        account_id: String,
        error: PadronError,
    },
}

impl EntryOutcome {
    pub fn account_id(&self) -> Option<&str> {
        match self {
            EntryOutcome::Synced { account_id } | EntryOutcome::ProfileFailed { account_id, .. } => {
                Some(account_id)
            }
            EntryOutcome::AccountFailed { .. } => None,
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, EntryOutcome::Synced { .. })
    }

    /// 失敗の原因
    pub fn error(&self) -> Option<&PadronError> {
        match self {
            EntryOutcome::Synced { .. } => None,
            EntryOutcome::AccountFailed { error } | EntryOutcome::ProfileFailed { error, .. } => {
                Some(error)
            }
        }
    }
}

#[derive(Debug)]
pub struct EntryReport {
    pub identifier: String,
    /// アカウント作成に使ったアドレス（実アドレスまたは合成アドレス）
    pub email: String,
    pub outcome: EntryOutcome,
}

/// 実行結果の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTally {
    pub synced: usize,
    pub profile_failed: usize,
    pub account_failed: usize,
}

impl ImportTally {
    pub fn from_reports(reports: &[EntryReport]) -> Self {
        reports
            .iter()
            .fold(Self::default(), |mut tally, report| {
                match report.outcome {
                    EntryOutcome::Synced { .. } => tally.synced += 1,
                    EntryOutcome::ProfileFailed { .. } => tally.profile_failed += 1,
                    EntryOutcome::AccountFailed { .. } => tally.account_failed += 1,
                }
                tally
            })
    }

    pub fn summary(&self) -> CommandSummary {
        CommandSummary::format(self.synced, self.profile_failed, self.account_failed)
    }
}

pub struct RosterImporter {
    identity: Box<dyn IdentityService>,
    store: Box<dyn ProfileStore>,
    options: ImportOptions,
    console: Console,
}

impl RosterImporter {
    pub fn new(
        identity: Box<dyn IdentityService>,
        store: Box<dyn ProfileStore>,
        options: ImportOptions,
        console: Console,
    ) -> Self {
        Self {
            identity,
            store,
            options,
            console,
        }
    }

    /// 名簿全体を先頭から処理し、終了バナーを出力する
    pub async fn run(&mut self, roster: &[RosterEntry]) -> Vec<EntryReport> {
        self.console.start(roster.len());

        let mut reports = Vec::with_capacity(roster.len());
        for entry in roster {
            reports.push(self.import_entry(entry).await);
        }

        let tally = ImportTally::from_reports(&reports);
        log::debug!("import finished: {:?}", tally);
        self.console.summary(&tally.summary());
        self.console.finished();

        reports
    }

    /// エントリ1件を処理する
    ///
    /// 失敗しない。エラーはすべて戻り値の outcome に入る。
    pub async fn import_entry(&mut self, entry: &RosterEntry) -> EntryReport {
        let account = NewAccount::for_entry(entry, self.options.prefer_real_email);
        self.console.processing(entry, &account.email);

        let outcome = match self.identity.create_account(&account).await {
            Err(error) => {
                log::debug!("create_account {} failed: {:?}", entry.identifier, error.status());
                self.console
                    .account_failed(&entry.identifier, &error.message());
                EntryOutcome::AccountFailed { error }
            }
            Ok(created) => {
                if !created.email_confirmed() {
                    log::warn!("account {} was created unconfirmed", created.account_id);
                }
                self.console.account_created(&created.account_id);

                let record =
                    ProfileRecord::new(&created.account_id, entry, &account.email, &self.options);
                match self.store.upsert_profile(&record).await {
                    Ok(()) => {
                        self.console.profile_synced();
                        EntryOutcome::Synced {
                            account_id: created.account_id,
                        }
                    }
                    Err(error) => {
                        log::debug!("upsert {} failed: {:?}", record.id, error.status());
                        self.console
                            .profile_failed(&entry.identifier, &error.message());
                        EntryOutcome::ProfileFailed {
                            account_id: created.account_id,
                            error,
                        }
                    }
                }
            }
        };

        EntryReport {
            identifier: entry.identifier.clone(),
            email: account.email,
            outcome,
        }
    }
}

#[cfg(test)]
#[path = "importer_test.rs"]
mod tests;
