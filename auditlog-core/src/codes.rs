//! Closed catalogue of audit event codes the formatter understands.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! event_codes {
    ($($variant:ident => $code:literal,)+) => {
        /// A known audit event code. Each variant maps to exactly one wire code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum EventCode {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl EventCode {
            pub const ALL: &'static [EventCode] = &[$(EventCode::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(EventCode::$variant => $code,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(EventCode::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

event_codes! {
    AccessRequestCreated => "T5000I",
    AccessRequestUpdated => "T5001I",
    AccessRequestReviewed => "T5002I",
    AccessRequestDeleted => "T5003I",
    AccessRequestResourceSearch => "T5004I",

    SessionCommand => "T4000I",
    SessionDisk => "T4001I",
    SessionNetwork => "T4002I",
    SessionProcessExit => "T4003I",

    SessionStart => "T2000I",
    SessionJoin => "T2001I",
    TerminalResize => "T2002I",
    SessionLeave => "T2003I",
    SessionEnd => "T2004I",
    SessionUpload => "T2005I",
    SessionData => "T2006I",
    AppSessionStart => "T2007I",
    AppSessionChunk => "T2008I",
    SessionConnect => "T2010I",
    AppSessionEnd => "T2011I",
    SessionRecordingAccess => "T2012I",
    SessionReject => "T1006W",

    UserLocalLogin => "T1000I",
    UserLocalLoginFailure => "T1000W",
    UserSsoLogin => "T1001I",
    UserSsoLoginFailure => "T1001W",
    UserCreated => "T1002I",
    UserUpdated => "T1003I",
    UserDeleted => "T1004I",
    UserPasswordChanged => "T1005I",
    MfaDeviceAdd => "T1006I",
    MfaDeviceDelete => "T1007I",
    RecoveryCodeGenerated => "T1008I",
    RecoveryCodeUsed => "T1009I",
    RecoveryCodeUsedFailure => "T1009W",
    UserSsoTestFlowLogin => "T1010I",
    UserSsoTestFlowLoginFailure => "T1011W",

    ResetPasswordTokenCreated => "T6000I",
    RecoveryTokenCreated => "T6001I",
    PrivilegeTokenCreated => "T6002I",

    Subsystem => "T3001I",
    SubsystemFailure => "T3001E",
    Exec => "T3002I",
    ExecFailure => "T3002E",
    PortForward => "T3003I",
    PortForwardFailure => "T3003E",
    ScpDownload => "T3004I",
    ScpDownloadFailure => "T3004E",
    ScpUpload => "T3005I",
    ScpUploadFailure => "T3005E",
    ClientDisconnect => "T3006W",
    AuthAttemptFailure => "T3007W",
    X11Forward => "T3008I",
    X11ForwardFailure => "T3008W",
    KubeRequest => "T3009I",

    SftpOpen => "TS001I",
    SftpOpenFailure => "TS001E",
    SftpClose => "TS002I",
    SftpCloseFailure => "TS002E",
    SftpRead => "TS003I",
    SftpReadFailure => "TS003E",
    SftpWrite => "TS004I",
    SftpWriteFailure => "TS004E",
    SftpLstat => "TS005I",
    SftpLstatFailure => "TS005E",
    SftpFstat => "TS006I",
    SftpFstatFailure => "TS006E",
    SftpSetstat => "TS007I",
    SftpSetstatFailure => "TS007E",
    SftpFsetstat => "TS008I",
    SftpFsetstatFailure => "TS008E",
    SftpOpendir => "TS009I",
    SftpOpendirFailure => "TS009E",
    SftpReaddir => "TS010I",
    SftpReaddirFailure => "TS010E",
    SftpRemove => "TS011I",
    SftpRemoveFailure => "TS011E",
    SftpMkdir => "TS012I",
    SftpMkdirFailure => "TS012E",
    SftpRmdir => "TS013I",
    SftpRmdirFailure => "TS013E",
    SftpRealpath => "TS014I",
    SftpRealpathFailure => "TS014E",
    SftpStat => "TS015I",
    SftpStatFailure => "TS015E",
    SftpRename => "TS016I",
    SftpRenameFailure => "TS016E",
    SftpReadlink => "TS017I",
    SftpReadlinkFailure => "TS017E",
    SftpSymlink => "TS018I",
    SftpSymlinkFailure => "TS018E",

    TrustedClusterCreated => "T7000I",
    TrustedClusterDeleted => "T7001I",
    TrustedClusterTokenCreated => "T7002I",

    GithubConnectorCreated => "T8000I",
    GithubConnectorDeleted => "T8001I",
    OidcConnectorCreated => "T8100I",
    OidcConnectorDeleted => "T8101I",
    SamlConnectorCreated => "T8200I",
    SamlConnectorDeleted => "T8201I",

    RoleCreated => "T9000I",
    RoleDeleted => "T9001I",
    LockCreated => "TLK00I",
    LockDeleted => "TLK01I",

    DatabaseSessionStarted => "TDB00I",
    DatabaseSessionStartedFailure => "TDB00W",
    DatabaseSessionEnded => "TDB01I",
    DatabaseSessionQuery => "TDB02I",
    DatabaseSessionQueryFailure => "TDB02W",
    DatabaseCreated => "TDB03I",
    DatabaseUpdated => "TDB04I",
    DatabaseDeleted => "TDB05I",
    DatabaseSessionMalformedPacket => "TDB06I",

    PostgresParse => "TPG00I",
    PostgresBind => "TPG01I",
    PostgresExecute => "TPG02I",
    PostgresClose => "TPG03I",
    PostgresFunctionCall => "TPG04I",

    MysqlStatementPrepare => "TMY00I",
    MysqlStatementExecute => "TMY01I",
    MysqlStatementSendLongData => "TMY02I",
    MysqlStatementClose => "TMY03I",
    MysqlStatementReset => "TMY04I",
    MysqlStatementFetch => "TMY05I",
    MysqlStatementBulkExecute => "TMY06I",
    MysqlInitDb => "TMY07I",
    MysqlCreateDb => "TMY08I",
    MysqlDropDb => "TMY09I",
    MysqlShutDown => "TMY10I",
    MysqlProcessKill => "TMY11I",
    MysqlDebug => "TMY12I",
    MysqlRefresh => "TMY13I",

    SqlServerRpcRequest => "TMS00I",

    DesktopSessionStarted => "TDP00I",
    DesktopSessionStartedFailed => "TDP00W",
    DesktopSessionEnded => "TDP01I",
    DesktopClipboardSend => "TDP02I",
    DesktopClipboardReceive => "TDP03I",

    BillingCardCreate => "TBL00I",
    BillingCardDelete => "TBL01I",
    BillingCardUpdate => "TBL02I",
    BillingInformationUpdate => "TBL03I",

    CertificateCreated => "TC000I",
    UpgradeWindowUpdated => "TUW01I",

    Unknown => "TCC00E",
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = EventCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes.len(), EventCode::ALL.len());
    }

    #[test]
    fn from_code_inverts_as_str() {
        for code in EventCode::ALL {
            assert_eq!(EventCode::from_code(code.as_str()), Some(*code));
        }
        assert_eq!(EventCode::from_code("T0000X"), None);
        assert_eq!(EventCode::from_code(""), None);
    }

    #[test]
    fn serializes_as_wire_code() {
        let json = serde_json::to_string(&EventCode::SessionEnd).unwrap();
        assert_eq!(json, "\"T2004I\"");
        let back: EventCode = serde_json::from_str("\"TS001E\"").unwrap();
        assert_eq!(back, EventCode::SftpOpenFailure);
    }
}
