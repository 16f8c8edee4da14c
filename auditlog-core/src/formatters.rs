//! Event code to descriptor registry.
//!
//! Each [`EventCode`] carries exactly one descriptor. The lookup table is built
//! once, on first use, and never changes afterwards, so it can be shared freely
//! across threads.

use crate::codes::EventCode;
use crate::raw::RawEvent;
use crate::text::{format_distance_strict, truncate};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// Longest query or statement text shown in a message.
pub const QUERY_DISPLAY_LEN: usize = 80;

pub type FormatFn = fn(&RawEvent) -> String;

/// How one kind of audit event is labelled and rendered.
#[derive(Clone, Copy)]
pub struct EventDescriptor {
    /// Stable short category, e.g. `session.start`.
    pub kind: &'static str,
    /// Human label, e.g. `Session Started`.
    pub desc: &'static str,
    format: FormatFn,
}

impl EventDescriptor {
    pub const fn new(kind: &'static str, desc: &'static str, format: FormatFn) -> Self {
        Self { kind, desc, format }
    }

    pub fn format(&self, raw: &RawEvent) -> String {
        (self.format)(raw)
    }

    pub fn is_fallback(&self) -> bool {
        std::ptr::eq(self, &UNKNOWN_DESCRIPTOR)
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("kind", &self.kind)
            .field("desc", &self.desc)
            .finish_non_exhaustive()
    }
}

fn format_unknown(_: &RawEvent) -> String {
    "Unknown".to_string()
}

/// Used for any code that is not in the catalogue.
pub static UNKNOWN_DESCRIPTOR: EventDescriptor =
    EventDescriptor::new("unknown", "Unknown", format_unknown);

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, EventDescriptor> = EventCode::ALL
        .iter()
        .map(|code| (code.as_str(), describe(*code)))
        .collect();
}

/// Finds the descriptor for a wire code, falling back to [`UNKNOWN_DESCRIPTOR`].
pub fn lookup(code: &str) -> &'static EventDescriptor {
    REGISTRY.get(code).unwrap_or(&UNKNOWN_DESCRIPTOR)
}

impl EventCode {
    pub fn descriptor(&self) -> &'static EventDescriptor {
        lookup(self.as_str())
    }
}

fn sftp(e: &RawEvent, action: &str) -> String {
    format!(
        "User [{}] {} [{}] on node [{}]",
        e.text("user"),
        action,
        e.text("path"),
        e.text("addr.local")
    )
}

fn sftp_failure(e: &RawEvent, action: &str) -> String {
    format!(
        "User [{}] failed to {} [{}] on node [{}]: [{}]",
        e.text("user"),
        action,
        e.text("path"),
        e.text("addr.local"),
        e.text("error")
    )
}

fn query(e: &RawEvent, key: &str) -> String {
    truncate(&e.text(key), QUERY_DISPLAY_LEN)
}

fn desktop(e: &RawEvent) -> String {
    format!("{}@{}", e.text("windows_user"), e.text("desktop_addr"))
}

fn session_end(e: &RawEvent) -> String {
    let user = e.text("user");
    let sid = e.text("sid");
    let node = e.first_text(&["server_hostname", "server_addr", "server_id"]);

    if e.text("proto") == "kube" {
        if !e.is_truthy("kubernetes_cluster") {
            return format!("User [{user}] has ended a kubernetes session [{sid}]");
        }
        return format!(
            "User [{user}] has ended a session [{sid}] on kubernetes cluster [{}]",
            e.text("kubernetes_cluster")
        );
    }

    if !e.is_truthy("interactive") {
        return format!("User [{user}] has ended a non-interactive session [{sid}] on node [{node}] ");
    }

    if let (Some(start), Some(stop)) = (e.timestamp("session_start"), e.timestamp("session_stop")) {
        let duration = format_distance_strict(start, stop);
        return format!(
            "User [{user}] has ended an interactive session lasting {duration} [{sid}] on node [{node}]"
        );
    }

    format!("User [{user}] has ended interactive session [{sid}] on node [{node}] ")
}

fn exec(e: &RawEvent) -> String {
    let user = e.text("user");
    if e.text("proto") == "kube" {
        if !e.is_truthy("kubernetes_cluster") {
            return format!("User [{user}] executed a kubernetes command");
        }
        return format!(
            "User [{user}] executed a command on kubernetes cluster [{}]",
            e.text("kubernetes_cluster")
        );
    }
    format!("User [{user}] executed a command on node {}", e.text("addr.local"))
}

fn exec_failure(e: &RawEvent) -> String {
    let user = e.text("user");
    let exit_error = e.text("exitError");
    if e.text("proto") == "kube" {
        if !e.is_truthy("kubernetes_cluster") {
            return format!("User [{user}] kubernetes command execution failed [{exit_error}]");
        }
        return format!(
            "User [{user}] command execution on kubernetes cluster [{}] failed [{exit_error}]",
            e.text("kubernetes_cluster")
        );
    }
    format!(
        "User [{user}] command execution on node {} failed [{exit_error}]",
        e.text("addr.local")
    )
}

fn session_network(e: &RawEvent) -> String {
    let denied = e.number("action") == Some(1.0);
    let (verdict, outcome) = if denied {
        ("[DENY]", "was prevented from opening")
    } else {
        ("[ALLOW]", "successfully opened")
    };
    format!(
        "{verdict} Program [{}] {outcome} a connection [{} <-> {}:{}] within a session [{}]",
        e.text("program"),
        e.text("src_addr"),
        e.text("dst_addr"),
        e.text("dst_port"),
        e.text("sid")
    )
}

fn app_session_start(e: &RawEvent) -> String {
    let user = e.text("user");
    let app = e.text("app_name");
    if e.is_truthy("aws_role_arn") {
        return format!("User [{user}] has connected to AWS console [{app}]");
    }
    format!("User [{user}] has connected to application [{app}]")
}

fn postgres_close(e: &RawEvent) -> String {
    if e.is_truthy("portal_name") {
        return format!(
            "User [{}] has closed portal [{}] on [{}]",
            e.text("user"),
            e.text("portal_name"),
            e.text("db_service")
        );
    }
    format!(
        "User [{}] has closed statement [{}] on [{}]",
        e.text("user"),
        e.text("statement_name"),
        e.text("db_service")
    )
}

fn certificate_created(e: &RawEvent) -> String {
    let user = e.text_path(&["identity", "user"]);
    let cert_type = e.text("cert_type");
    if cert_type == "user" {
        return format!("User certificate issued for [{user}]");
    }
    format!("Certificate of type [{cert_type}] issued for [{user}]")
}

fn describe(code: EventCode) -> EventDescriptor {
    use EventCode::*;
    let d = EventDescriptor::new;

    match code {
        AccessRequestCreated => d("access_request.create", "Access Request Created", |e| {
            format!("Access request [{}] has been created and is {}", e.text("id"), e.text("state"))
        }),
        AccessRequestUpdated => d("access_request.update", "Access Request Updated", |e| {
            format!("Access request [{}] has been updated to {}", e.text("id"), e.text("state"))
        }),
        AccessRequestReviewed => d("access_request.review", "Access Request Reviewed", |e| {
            format!("User [{}] reviewed access request [{}]", e.text("reviewer"), e.text("id"))
        }),
        AccessRequestDeleted => d("access_request.delete", "Access Request Deleted", |e| {
            format!("Access request [{}] has been deleted", e.text("id"))
        }),
        AccessRequestResourceSearch => d("access_request.search", "Resource Access Request Search", |e| {
            format!(
                "User [{}] searched for resource type [{}] with role(s) [{}]",
                e.text("user"),
                e.text("resource_type"),
                e.text("search_as_roles")
            )
        }),

        SessionCommand => d("session.command", "Session Command", |e| {
            format!(
                "Program [{}] has been executed within a session [{}]",
                e.text("program"),
                e.text("sid")
            )
        }),
        SessionDisk => d("session.disk", "Session File Access", |e| {
            format!(
                "Program [{}] accessed a file [{}] within a session [{}]",
                e.text("program"),
                e.text("path"),
                e.text("sid")
            )
        }),
        SessionNetwork => d("session.network", "Session Network Connection", session_network),
        SessionProcessExit => d("session.process_exit", "Session Process Exit", |e| {
            format!(
                "Program [{}] has exited with status {}, within a session [{}]",
                e.text("program"),
                e.text("exit_status"),
                e.text("sid")
            )
        }),
        SessionData => d("session.data", "Session Data", |e| {
            format!("Usage report has been updated for session [{}]", e.text("sid"))
        }),

        SessionStart => d("session.start", "Session Started", |e| {
            format!("User [{}] has started a session [{}]", e.text("user"), e.text("sid"))
        }),
        SessionJoin => d("session.join", "User Joined", |e| {
            format!("User [{}] has joined the session [{}]", e.text("user"), e.text("sid"))
        }),
        TerminalResize => d("resize", "Terminal Resize", |e| {
            format!("User [{}] resized the session [{}] terminal", e.text("user"), e.text("sid"))
        }),
        SessionLeave => d("session.leave", "User Disconnected", |e| {
            format!("User [{}] has left the session [{}]", e.text("user"), e.text("sid"))
        }),
        SessionEnd => d("session.end", "Session Ended", session_end),
        SessionUpload => d("session.upload", "Session Uploaded", |_| {
            "Recorded session has been uploaded".to_string()
        }),
        SessionConnect => d("session.connect", "Session Connected", |e| {
            format!("Session connected to [{}]", e.text("server_addr"))
        }),
        SessionRecordingAccess => d("session.recording.access", "Session Recording Accessed", |e| {
            format!("User [{}] accessed a session recording [{}]", e.text("user"), e.text("sid"))
        }),
        SessionReject => d("session.rejected", "Session Rejected", |e| {
            format!(
                "User [{}] was denied access to [{}@{}] because [{}]",
                e.text("user"),
                e.text("login"),
                e.text("server_id"),
                e.text("reason")
            )
        }),

        AppSessionStart => d("app.session.start", "App Session Started", app_session_start),
        AppSessionEnd => d("app.session.end", "App Session Ended", |e| {
            format!(
                "User [{}] has disconnected from application [{}]",
                e.text("user"),
                e.text("app_name")
            )
        }),
        AppSessionChunk => d("app.session.chunk", "App Session Data", |e| {
            format!(
                "New session data chunk created for application [{}] accessed by user [{}]",
                e.text("app_name"),
                e.text("user")
            )
        }),

        UserLocalLogin => d("user.login", "Local Login", |e| {
            format!("Local user [{}] successfully logged in", e.text("user"))
        }),
        UserLocalLoginFailure => d("user.login", "Local Login Failed", |e| {
            format!("Local user [{}] login failed [{}]", e.text("user"), e.text("error"))
        }),
        UserSsoLogin => d("user.login", "SSO Login", |e| {
            format!("SSO user [{}] successfully logged in", e.text("user"))
        }),
        UserSsoLoginFailure => d("user.login", "SSO Login Failed", |e| {
            format!("SSO user login failed [{}]", e.text("error"))
        }),
        UserSsoTestFlowLogin => d("user.login", "SSO Test Flow Login", |e| {
            format!("SSO Test Flow: user [{}] successfully logged in", e.text("user"))
        }),
        UserSsoTestFlowLoginFailure => d("user.login", "SSO Test Flow Login Failed", |e| {
            format!("SSO Test flow: user login failed [{}]", e.text("error"))
        }),
        UserCreated => d("user.create", "User Created", |e| {
            format!("User [{}] has been created", e.text("name"))
        }),
        UserUpdated => d("user.update", "User Updated", |e| {
            format!("User [{}] has been updated", e.text("name"))
        }),
        UserDeleted => d("user.delete", "User Deleted", |e| {
            format!("User [{}] has been deleted", e.text("name"))
        }),
        UserPasswordChanged => d("user.password_change", "User Password Updated", |e| {
            format!("User [{}] has changed a password", e.text("user"))
        }),
        MfaDeviceAdd => d("mfa.add", "MFA Device Added", |e| {
            format!(
                "User [{}] added {} device [{}]",
                e.text("user"),
                e.text("mfa_device_type"),
                e.text("mfa_device_name")
            )
        }),
        MfaDeviceDelete => d("mfa.delete", "MFA Device Deleted", |e| {
            format!(
                "User [{}] deleted {} device [{}]",
                e.text("user"),
                e.text("mfa_device_type"),
                e.text("mfa_device_name")
            )
        }),
        RecoveryCodeGenerated => d("recovery_code.generated", "Recovery Codes Generated", |e| {
            format!("New recovery codes were generated for user [{}]", e.text("user"))
        }),
        RecoveryCodeUsed => d("recovery_code.used", "Recovery Code Used", |e| {
            format!("User [{}] successfully used a recovery code", e.text("user"))
        }),
        RecoveryCodeUsedFailure => d("recovery_code.used", "Recovery Code Use Failed", |e| {
            format!("User [{}] failed an attempt to use a recovery code", e.text("user"))
        }),

        ResetPasswordTokenCreated => d("reset_password_token.create", "Reset Password Token Created", |e| {
            format!(
                "User [{}] created a password reset token for user [{}]",
                e.text("user"),
                e.text("name")
            )
        }),
        RecoveryTokenCreated => d("recovery_token.create", "Recovery Token Created", |e| {
            format!("Recovery token was created for user [{}]", e.text("name"))
        }),
        PrivilegeTokenCreated => d("privilege_token.create", "Privilege Token Created", |e| {
            format!("Privilege token was created for user [{}]", e.text("name"))
        }),

        Subsystem => d("subsystem", "Subsystem Requested", |e| {
            format!("User [{}] requested subsystem [{}]", e.text("user"), e.text("name"))
        }),
        SubsystemFailure => d("subsystem", "Subsystem Request Failed", |e| {
            format!(
                "User [{}] subsystem [{}] request failed [{}]",
                e.text("user"),
                e.text("name"),
                e.text("exitError")
            )
        }),
        Exec => d("exec", "Command Execution", exec),
        ExecFailure => d("exec", "Command Execution Failed", exec_failure),
        PortForward => d("port", "Port Forwarding Started", |e| {
            format!("User [{}] started port forwarding", e.text("user"))
        }),
        PortForwardFailure => d("port", "Port Forwarding Failed", |e| {
            format!("User [{}] port forwarding request failed: {}", e.text("user"), e.text("error"))
        }),
        ScpDownload => d("scp", "SCP Download", |e| {
            format!(
                "User [{}] downloaded a file [{}] from node [{}]",
                e.text("user"),
                e.text("path"),
                e.text("addr.local")
            )
        }),
        ScpDownloadFailure => d("scp", "SCP Download Failed", |e| {
            format!(
                "File download from node [{}] failed [{}]",
                e.text("addr.local"),
                e.text("exitError")
            )
        }),
        ScpUpload => d("scp", "SCP Upload", |e| {
            format!(
                "User [{}] uploaded a file [{}] to node [{}]",
                e.text("user"),
                e.text("path"),
                e.text("addr.local")
            )
        }),
        ScpUploadFailure => d("scp", "SCP Upload Failed", |e| {
            format!(
                "File upload to node [{}] failed [{}]",
                e.text("addr.local"),
                e.text("exitError")
            )
        }),
        ClientDisconnect => d("client.disconnect", "Client Disconnected", |e| {
            format!("User [{}] has been disconnected: {}", e.text("user"), e.text("reason"))
        }),
        AuthAttemptFailure => d("auth", "Auth Attempt Failed", |e| {
            format!("User [{}] failed auth attempt: {}", e.text("user"), e.text("error"))
        }),
        X11Forward => d("x11-forward", "X11 Forwarding Requested", |e| {
            format!("User [{}] has requested x11 forwarding for a session", e.text("user"))
        }),
        X11ForwardFailure => d("x11-forward", "X11 Forwarding Request Failed", |e| {
            format!("User [{}] was denied x11 forwarding for a session", e.text("user"))
        }),
        KubeRequest => d("kube.request", "Kubernetes Request", |e| {
            format!(
                "User [{}] made a request to kubernetes cluster [{}]",
                e.text("user"),
                e.text("kubernetes_cluster")
            )
        }),

        SftpOpen => d("sftp", "SFTP Open", |e| sftp(e, "opened file")),
        SftpOpenFailure => d("sftp", "SFTP Open Failed", |e| sftp_failure(e, "open file")),
        SftpClose => d("sftp", "SFTP Close", |e| sftp(e, "closed file")),
        SftpCloseFailure => d("sftp", "SFTP Close Failed", |e| sftp_failure(e, "close file")),
        SftpRead => d("sftp", "SFTP Read", |e| sftp(e, "read from file")),
        SftpReadFailure => d("sftp", "SFTP Read Failed", |e| sftp_failure(e, "read from file")),
        SftpWrite => d("sftp", "SFTP Write", |e| sftp(e, "wrote to file")),
        SftpWriteFailure => d("sftp", "SFTP Write Failed", |e| sftp_failure(e, "write to file")),
        SftpLstat => d("sftp", "SFTP Lstat", |e| sftp(e, "queried attributes of file")),
        SftpLstatFailure => d("sftp", "SFTP Lstat Failed", |e| {
            sftp_failure(e, "query attributes of file")
        }),
        SftpFstat => d("sftp", "SFTP Fstat", |e| sftp(e, "queried attributes of file")),
        SftpFstatFailure => d("sftp", "SFTP Fstat Failed", |e| {
            sftp_failure(e, "query attributes of file")
        }),
        SftpSetstat => d("sftp", "SFTP Setstat", |e| sftp(e, "changed attributes of file")),
        SftpSetstatFailure => d("sftp", "SFTP Setstat Failed", |e| {
            sftp_failure(e, "change attributes of file")
        }),
        SftpFsetstat => d("sftp", "SFTP Fsetstat", |e| sftp(e, "changed attributes of file")),
        SftpFsetstatFailure => d("sftp", "SFTP Fsetstat Failed", |e| {
            sftp_failure(e, "change attributes of file")
        }),
        SftpOpendir => d("sftp", "SFTP Opendir", |e| sftp(e, "opened directory")),
        SftpOpendirFailure => d("sftp", "SFTP Opendir Failed", |e| sftp_failure(e, "open directory")),
        SftpReaddir => d("sftp", "SFTP Readdir", |e| sftp(e, "read directory")),
        SftpReaddirFailure => d("sftp", "SFTP Readdir Failed", |e| sftp_failure(e, "read directory")),
        SftpRemove => d("sftp", "SFTP Remove", |e| sftp(e, "removed file")),
        SftpRemoveFailure => d("sftp", "SFTP Remove Failed", |e| sftp_failure(e, "remove file")),
        SftpMkdir => d("sftp", "SFTP Mkdir", |e| sftp(e, "created directory")),
        SftpMkdirFailure => d("sftp", "SFTP Mkdir Failed", |e| sftp_failure(e, "create directory")),
        SftpRmdir => d("sftp", "SFTP Rmdir", |e| sftp(e, "removed directory")),
        SftpRmdirFailure => d("sftp", "SFTP Rmdir Failed", |e| sftp_failure(e, "remove directory")),
        SftpRealpath => d("sftp", "SFTP Realpath", |e| sftp(e, "queried absolute path of file")),
        SftpRealpathFailure => d("sftp", "SFTP Realpath Failed", |e| {
            sftp_failure(e, "query absolute path of file")
        }),
        SftpStat => d("sftp", "SFTP Stat", |e| sftp(e, "queried attributes of file")),
        SftpStatFailure => d("sftp", "SFTP Stat Failed", |e| {
            sftp_failure(e, "query attributes of file")
        }),
        SftpRename => d("sftp", "SFTP Rename", |e| sftp(e, "renamed file")),
        SftpRenameFailure => d("sftp", "SFTP Rename Failed", |e| sftp_failure(e, "rename file")),
        SftpReadlink => d("sftp", "SFTP Readlink", |e| sftp(e, "read symbolic link")),
        SftpReadlinkFailure => d("sftp", "SFTP Readlink Failed", |e| {
            sftp_failure(e, "read symbolic link")
        }),
        SftpSymlink => d("sftp", "SFTP Symlink", |e| sftp(e, "created symbolic link")),
        SftpSymlinkFailure => d("sftp", "SFTP Symlink Failed", |e| {
            sftp_failure(e, "create symbolic link")
        }),

        TrustedClusterCreated => d("trusted_cluster.create", "Trusted Cluster Created", |e| {
            format!(
                "User [{}] has created a trusted relationship with cluster [{}]",
                e.text("user"),
                e.text("name")
            )
        }),
        TrustedClusterDeleted => d("trusted_cluster.delete", "Trusted Cluster Deleted", |e| {
            format!(
                "User [{}] has deleted a trusted relationship with cluster [{}]",
                e.text("user"),
                e.text("name")
            )
        }),
        TrustedClusterTokenCreated => d("trusted_cluster_token.create", "Trusted Cluster Token Created", |e| {
            format!("User [{}] has created a trusted cluster token", e.text("user"))
        }),

        GithubConnectorCreated => d("github.created", "GITHUB Auth Connector Created", |e| {
            format!("User [{}] created Github connector [{}]", e.text("user"), e.text("name"))
        }),
        GithubConnectorDeleted => d("github.deleted", "GITHUB Auth Connector Deleted", |e| {
            format!("User [{}] deleted Github connector [{}]", e.text("user"), e.text("name"))
        }),
        OidcConnectorCreated => d("oidc.created", "OIDC Auth Connector Created", |e| {
            format!("User [{}] created OIDC connector [{}]", e.text("user"), e.text("name"))
        }),
        OidcConnectorDeleted => d("oidc.deleted", "OIDC Auth Connector Deleted", |e| {
            format!("User [{}] deleted OIDC connector [{}]", e.text("user"), e.text("name"))
        }),
        SamlConnectorCreated => d("saml.created", "SAML Connector Created", |e| {
            format!("User [{}] created SAML connector [{}]", e.text("user"), e.text("name"))
        }),
        SamlConnectorDeleted => d("saml.deleted", "SAML Connector Deleted", |e| {
            format!("User [{}] deleted SAML connector [{}]", e.text("user"), e.text("name"))
        }),

        RoleCreated => d("role.created", "User Role Created", |e| {
            format!("User [{}] created a role [{}]", e.text("user"), e.text("name"))
        }),
        RoleDeleted => d("role.deleted", "User Role Deleted", |e| {
            format!("User [{}] deleted a role [{}]", e.text("user"), e.text("name"))
        }),
        LockCreated => d("lock.created", "Lock Created", |e| {
            format!("Lock [{}] was created by user [{}]", e.text("name"), e.text("user"))
        }),
        LockDeleted => d("lock.deleted", "Lock Deleted", |e| {
            format!("Lock [{}] was deleted by user [{}]", e.text("name"), e.text("user"))
        }),

        DatabaseSessionStarted => d("db.session.start", "Database Session Started", |e| {
            format!(
                "User [{}] has connected to database [{}] as [{}] on [{}]",
                e.text("user"),
                e.text("db_name"),
                e.text("db_user"),
                e.text("db_service")
            )
        }),
        DatabaseSessionStartedFailure => d("db.session.start", "Database Session Denied", |e| {
            format!(
                "User [{}] was denied access to database [{}] as [{}] on [{}]",
                e.text("user"),
                e.text("db_name"),
                e.text("db_user"),
                e.text("db_service")
            )
        }),
        DatabaseSessionEnded => d("db.session.end", "Database Session Ended", |e| {
            format!(
                "User [{}] has disconnected from database [{}] on [{}]",
                e.text("user"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        DatabaseSessionQuery => d("db.session.query", "Database Query", |e| {
            format!(
                "User [{}] has executed query [{}] in database [{}] on [{}]",
                e.text("user"),
                query(e, "db_query"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        DatabaseSessionQueryFailure => d("db.session.query.failed", "Database Query Failed", |e| {
            format!(
                "User [{}] query [{}] in database [{}] on [{}] failed",
                e.text("user"),
                query(e, "db_query"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        DatabaseSessionMalformedPacket => d("db.session.malformed_packet", "Database Malformed Packet", |e| {
            format!(
                "Received malformed packet from [{}] in [{}] on database [{}]",
                e.text("user"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        DatabaseCreated => d("db.create", "Database Created", |e| {
            format!("User [{}] created database [{}]", e.text("user"), e.text("name"))
        }),
        DatabaseUpdated => d("db.update", "Database Updated", |e| {
            format!("User [{}] updated database [{}]", e.text("user"), e.text("name"))
        }),
        DatabaseDeleted => d("db.delete", "Database Deleted", |e| {
            format!("User [{}] deleted database [{}]", e.text("user"), e.text("name"))
        }),

        PostgresParse => d("db.session.postgres.statements.parse", "PostgreSQL Statement Parse", |e| {
            format!(
                "User [{}] has prepared [{}] as statement [{}] on [{}]",
                e.text("user"),
                query(e, "query"),
                e.text("statement_name"),
                e.text("db_service")
            )
        }),
        PostgresBind => d("db.session.postgres.statements.bind", "PostgreSQL Statement Bind", |e| {
            format!(
                "User [{}] has readied statement [{}] for execution as portal [{}] on [{}]",
                e.text("user"),
                e.text("statement_name"),
                e.text("portal_name"),
                e.text("db_service")
            )
        }),
        PostgresExecute => d("db.session.postgres.statements.execute", "PostgreSQL Statement Execute", |e| {
            format!(
                "User [{}] has executed portal [{}] on [{}]",
                e.text("user"),
                e.text("portal_name"),
                e.text("db_service")
            )
        }),
        PostgresClose => d(
            "db.session.postgres.statements.close",
            "PostgreSQL Statement Close",
            postgres_close,
        ),
        PostgresFunctionCall => d("db.session.postgres.function", "PostgreSQL Function Call", |e| {
            format!(
                "User [{}] has executed function with OID [{}] on [{}]",
                e.text("user"),
                e.text("function_oid"),
                e.text("db_service")
            )
        }),

        MysqlStatementPrepare => d("db.session.mysql.statements.prepare", "MySQL Statement Prepare", |e| {
            format!(
                "User [{}] has prepared [{}] in database [{}] on [{}]",
                e.text("user"),
                query(e, "query"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        MysqlStatementExecute => d("db.session.mysql.statements.execute", "MySQL Statement Execute", |e| {
            format!(
                "User [{}] has executed statement [{}] in database [{}] on [{}]",
                e.text("user"),
                e.text("statement_id"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        MysqlStatementSendLongData => d(
            "db.session.mysql.statements.send_long_data",
            "MySQL Statement Send Long Data",
            |e| {
                format!(
                    "User [{}] has sent {} bytes of data to parameter [{}] of statement [{}] in database [{}] on [{}]",
                    e.text("user"),
                    e.text("data_size"),
                    e.text("parameter_id"),
                    e.text("statement_id"),
                    e.text("db_name"),
                    e.text("db_service")
                )
            },
        ),
        MysqlStatementClose => d("db.session.mysql.statements.close", "MySQL Statement Close", |e| {
            format!(
                "User [{}] has closed statement [{}] in database [{}] on [{}]",
                e.text("user"),
                e.text("statement_id"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        MysqlStatementReset => d("db.session.mysql.statements.reset", "MySQL Statement Reset", |e| {
            format!(
                "User [{}] has reset statement [{}] in database [{}] on [{}]",
                e.text("user"),
                e.text("statement_id"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        MysqlStatementFetch => d("db.session.mysql.statements.fetch", "MySQL Statement Fetch", |e| {
            format!(
                "User [{}] has fetched {} rows of statement [{}] in database [{}] on [{}]",
                e.text("user"),
                e.text("rows_count"),
                e.text("statement_id"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),
        MysqlStatementBulkExecute => d(
            "db.session.mysql.statements.bulk_execute",
            "MySQL Statement Bulk Execute",
            |e| {
                format!(
                    "User [{}] has executed statement [{}] in database [{}] on [{}]",
                    e.text("user"),
                    e.text("statement_id"),
                    e.text("db_name"),
                    e.text("db_service")
                )
            },
        ),
        MysqlInitDb => d("db.session.mysql.init_db", "MySQL Change Database", |e| {
            format!(
                "User [{}] has changed default database to [{}] on [{}]",
                e.text("user"),
                e.text("schema_name"),
                e.text("db_service")
            )
        }),
        MysqlCreateDb => d("db.session.mysql.create_db", "MySQL Create Database", |e| {
            format!(
                "User [{}] has created database [{}] on [{}]",
                e.text("user"),
                e.text("schema_name"),
                e.text("db_service")
            )
        }),
        MysqlDropDb => d("db.session.mysql.drop_db", "MySQL Drop Database", |e| {
            format!(
                "User [{}] has dropped database [{}] on [{}]",
                e.text("user"),
                e.text("schema_name"),
                e.text("db_service")
            )
        }),
        MysqlShutDown => d("db.session.mysql.shut_down", "MySQL Shut Down", |e| {
            format!(
                "User [{}] has attempted to shut down [{}]",
                e.text("user"),
                e.text("db_service")
            )
        }),
        MysqlProcessKill => d("db.session.mysql.process_kill", "MySQL Kill Process", |e| {
            format!(
                "User [{}] has attempted to kill process [{}] on [{}]",
                e.text("user"),
                e.text("process_id"),
                e.text("db_service")
            )
        }),
        MysqlDebug => d("db.session.mysql.debug", "MySQL Debug", |e| {
            format!(
                "User [{}] has asked [{}] to dump debug information",
                e.text("user"),
                e.text("db_service")
            )
        }),
        MysqlRefresh => d("db.session.mysql.refresh", "MySQL Refresh", |e| {
            format!(
                "User [{}] has sent command [{}] to [{}]",
                e.text("user"),
                e.text("subcommand"),
                e.text("db_service")
            )
        }),
        SqlServerRpcRequest => d("db.session.sqlserver.rpc_request", "SQLServer RPC Request", |e| {
            format!(
                "User [{}] has sent RPC Request [{}] in database [{}] on [{}]",
                e.text("user"),
                e.text("proc_name"),
                e.text("db_name"),
                e.text("db_service")
            )
        }),

        DesktopSessionStarted => d("windows.desktop.session.start", "Windows Desktop Session Started", |e| {
            format!(
                "User [{}] has connected to Windows desktop [{}] on [{}]",
                e.text("user"),
                desktop(e),
                e.text("windows_domain")
            )
        }),
        DesktopSessionStartedFailed => d("windows.desktop.session.start", "Windows Desktop Session Denied", |e| {
            format!(
                "User [{}] was denied access to Windows desktop [{}] on [{}]",
                e.text("user"),
                desktop(e),
                e.text("windows_domain")
            )
        }),
        DesktopSessionEnded => d("windows.desktop.session.end", "Windows Desktop Session Ended", |e| {
            format!(
                "Session for Windows desktop [{}] on [{}] has ended for user [{}]",
                desktop(e),
                e.text("windows_domain"),
                e.text("user")
            )
        }),
        DesktopClipboardReceive => d("desktop.clipboard.receive", "Clipboard Data Received", |e| {
            format!(
                "User [{}] received {} bytes of clipboard data from desktop [{}]",
                e.text("user"),
                e.text("length"),
                e.text("desktop_addr")
            )
        }),
        DesktopClipboardSend => d("desktop.clipboard.send", "Clipboard Data Sent", |e| {
            format!(
                "User [{}] sent {} bytes of clipboard data to desktop [{}]",
                e.text("user"),
                e.text("length"),
                e.text("desktop_addr")
            )
        }),

        BillingCardCreate => d("billing.create_card", "Credit Card Added", |e| {
            format!("User [{}] has added a credit card", e.text("user"))
        }),
        BillingCardDelete => d("billing.delete_card", "Credit Card Deleted", |e| {
            format!("User [{}] has deleted a credit card", e.text("user"))
        }),
        BillingCardUpdate => d("billing.update_card", "Credit Card Updated", |e| {
            format!("User [{}] has updated a credit card", e.text("user"))
        }),
        BillingInformationUpdate => d("billing.update_info", "Billing Information Updated", |e| {
            format!("User [{}] has updated the billing information", e.text("user"))
        }),

        CertificateCreated => d("cert.create", "Certificate Issued", certificate_created),
        UpgradeWindowUpdated => d("upgradewindow.update", "Upgrade Window Start Updated", |e| {
            format!(
                "Upgrade Window Start updated to [{}] by user [{}]",
                e.text("upgrade_window_start"),
                e.text("user")
            )
        }),

        Unknown => d("unknown", "Unknown Event", |e| {
            format!(
                "Unknown '{}' event ({})",
                e.text("unknown_type"),
                e.text("unknown_code")
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(code: EventCode, fields: serde_json::Value) -> String {
        code.descriptor().format(&RawEvent::new(fields))
    }

    #[test]
    fn every_code_has_its_own_descriptor() {
        for code in EventCode::ALL {
            let descriptor = lookup(code.as_str());
            assert!(!descriptor.is_fallback(), "{code} resolved to the fallback");
            assert!(!descriptor.desc.is_empty());
            assert!(!descriptor.kind.is_empty());
        }
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in ["", "T0000I", "t2000i", "not-a-code"] {
            let descriptor = lookup(code);
            assert!(descriptor.is_fallback());
            assert_eq!(descriptor.desc, "Unknown");
            assert_eq!(descriptor.format(&RawEvent::default()), "Unknown");
        }
    }

    #[test]
    fn registered_unknown_is_not_the_fallback() {
        let descriptor = EventCode::Unknown.descriptor();
        assert!(!descriptor.is_fallback());
        assert_eq!(descriptor.desc, "Unknown Event");
        assert_eq!(
            render(EventCode::Unknown, json!({"unknown_type": "foo.bar", "unknown_code": "X1"})),
            "Unknown 'foo.bar' event (X1)"
        );
    }

    #[test]
    fn session_network_verdicts() {
        let base = json!({
            "program": "curl", "src_addr": "10.0.0.2", "dst_addr": "1.1.1.1",
            "dst_port": 443, "sid": "s1"
        });
        let mut deny = base.clone();
        deny["action"] = json!(1);
        let mut allow = base.clone();
        allow["action"] = json!(0);

        assert_eq!(
            render(EventCode::SessionNetwork, deny),
            "[DENY] Program [curl] was prevented from opening a connection [10.0.0.2 <-> 1.1.1.1:443] within a session [s1]"
        );
        assert_eq!(
            render(EventCode::SessionNetwork, allow),
            "[ALLOW] Program [curl] successfully opened a connection [10.0.0.2 <-> 1.1.1.1:443] within a session [s1]"
        );
        assert!(render(EventCode::SessionNetwork, base).starts_with("[ALLOW]"));
    }

    #[test]
    fn session_end_kube_without_cluster() {
        let msg = render(
            EventCode::SessionEnd,
            json!({"user": "bob", "sid": "s9", "proto": "kube", "interactive": true}),
        );
        assert_eq!(msg, "User [bob] has ended a kubernetes session [s9]");
    }

    #[test]
    fn session_end_kube_with_cluster() {
        let msg = render(
            EventCode::SessionEnd,
            json!({"user": "bob", "sid": "s9", "proto": "kube", "kubernetes_cluster": "prod"}),
        );
        assert_eq!(msg, "User [bob] has ended a session [s9] on kubernetes cluster [prod]");
    }

    #[test]
    fn session_end_non_interactive() {
        let msg = render(
            EventCode::SessionEnd,
            json!({"user": "bob", "sid": "s9", "interactive": false, "server_hostname": "web-1"}),
        );
        assert_eq!(msg, "User [bob] has ended a non-interactive session [s9] on node [web-1] ");
    }

    #[test]
    fn session_end_with_duration() {
        let msg = render(
            EventCode::SessionEnd,
            json!({
                "user": "bob", "sid": "s9", "interactive": true,
                "server_addr": "10.1.1.1:3022",
                "session_start": "2022-05-01T10:00:00Z",
                "session_stop": "2022-05-01T10:05:00Z"
            }),
        );
        assert_eq!(
            msg,
            "User [bob] has ended an interactive session lasting 5 minutes [s9] on node [10.1.1.1:3022]"
        );
    }

    #[test]
    fn session_end_without_duration() {
        let msg = render(
            EventCode::SessionEnd,
            json!({"user": "bob", "sid": "s9", "interactive": true, "server_id": "node-id",
                   "session_start": "2022-05-01T10:00:00Z"}),
        );
        assert_eq!(msg, "User [bob] has ended interactive session [s9] on node [node-id] ");
        assert!(!msg.contains("lasting"));
    }

    #[test]
    fn exec_variants() {
        assert_eq!(
            render(EventCode::Exec, json!({"user": "al", "proto": "kube"})),
            "User [al] executed a kubernetes command"
        );
        assert_eq!(
            render(EventCode::Exec, json!({"user": "al", "proto": "kube", "kubernetes_cluster": "c1"})),
            "User [al] executed a command on kubernetes cluster [c1]"
        );
        assert_eq!(
            render(EventCode::Exec, json!({"user": "al", "proto": "ssh", "addr.local": "10.0.0.5:3022"})),
            "User [al] executed a command on node 10.0.0.5:3022"
        );
        assert_eq!(
            render(EventCode::Exec, json!({})),
            "User [] executed a command on node "
        );
    }

    #[test]
    fn exec_failure_variants() {
        assert_eq!(
            render(EventCode::ExecFailure, json!({"user": "al", "addr.local": "n1", "exitError": "exit 2"})),
            "User [al] command execution on node n1 failed [exit 2]"
        );
        assert_eq!(
            render(EventCode::ExecFailure, json!({"user": "al", "proto": "kube", "kubernetes_cluster": "c1", "exitError": "boom"})),
            "User [al] command execution on kubernetes cluster [c1] failed [boom]"
        );
        assert_eq!(
            render(EventCode::ExecFailure, json!({"user": "al", "proto": "kube", "exitError": "boom"})),
            "User [al] kubernetes command execution failed [boom]"
        );
    }

    #[test]
    fn app_session_start_variants() {
        assert_eq!(
            render(EventCode::AppSessionStart, json!({"user": "al", "app_name": "grafana"})),
            "User [al] has connected to application [grafana]"
        );
        assert_eq!(
            render(
                EventCode::AppSessionStart,
                json!({"user": "al", "app_name": "aws", "aws_role_arn": "arn:aws:iam::1:role/x"})
            ),
            "User [al] has connected to AWS console [aws]"
        );
    }

    #[test]
    fn queries_are_truncated() {
        let long = format!("SELECT {} FROM t", "x, ".repeat(40));
        let msg = render(
            EventCode::DatabaseSessionQuery,
            json!({"user": "al", "db_query": long, "db_name": "app", "db_service": "pg"}),
        );
        let expected = truncate(&long, QUERY_DISPLAY_LEN);
        assert_eq!(expected.chars().count(), 80);
        assert_eq!(
            msg,
            format!("User [al] has executed query [{expected}] in database [app] on [pg]")
        );

        let short = render(
            EventCode::PostgresParse,
            json!({"user": "al", "query": "SELECT 1", "statement_name": "s1", "db_service": "pg"}),
        );
        assert_eq!(short, "User [al] has prepared [SELECT 1] as statement [s1] on [pg]");
    }

    #[test]
    fn postgres_close_prefers_portal() {
        assert_eq!(
            render(EventCode::PostgresClose, json!({"user": "al", "portal_name": "p1", "statement_name": "s1", "db_service": "pg"})),
            "User [al] has closed portal [p1] on [pg]"
        );
        assert_eq!(
            render(EventCode::PostgresClose, json!({"user": "al", "portal_name": "", "statement_name": "s1", "db_service": "pg"})),
            "User [al] has closed statement [s1] on [pg]"
        );
    }

    #[test]
    fn certificate_phrasing() {
        assert_eq!(
            render(EventCode::CertificateCreated, json!({"cert_type": "user", "identity": {"user": "al"}})),
            "User certificate issued for [al]"
        );
        assert_eq!(
            render(EventCode::CertificateCreated, json!({"cert_type": "db", "identity": {"user": "al"}})),
            "Certificate of type [db] issued for [al]"
        );
        assert_eq!(
            render(EventCode::CertificateCreated, json!({"cert_type": "user"})),
            "User certificate issued for []"
        );
    }

    #[test]
    fn sftp_messages() {
        let fields = json!({"user": "al", "path": "/etc/hosts", "addr.local": "n1", "error": "denied"});
        assert_eq!(
            render(EventCode::SftpOpen, fields.clone()),
            "User [al] opened file [/etc/hosts] on node [n1]"
        );
        assert_eq!(
            render(EventCode::SftpRmdirFailure, fields),
            "User [al] failed to remove directory [/etc/hosts] on node [n1]: [denied]"
        );
    }

    #[test]
    fn every_formatter_tolerates_an_empty_record() {
        let empty = RawEvent::new(json!({}));
        let not_object = RawEvent::new(json!("text"));
        for code in EventCode::ALL {
            let descriptor = code.descriptor();
            assert!(!descriptor.format(&empty).is_empty());
            assert!(!descriptor.format(&not_object).is_empty());
        }
    }
}
