//! 内置子域名字典
//!
//! 默认候选标签集合。字典只是一个外部数据源，可以用 `-f` 指定的
//! 字典文件或 `ScanConfig::wordlist` 注入的集合整体替换。

/// 默认子域名标签
pub static DEFAULT_SUB_DATA: &[&str] = &[
    "www", "mail", "ftp", "webmail", "smtp", "pop", "pop3", "imap", "ns", "ns0",
    "ns1", "ns2", "ns3", "dns", "mx", "mx0", "mx1", "mx2", "mx3", "exchange",
    "email", "postmaster", "mailgate", "netmail", "imail", "imaps", "imapd",
    "admin", "administrator", "access", "account", "accounts", "accounting",
    "api", "api1", "api2", "api-dev", "api-docs", "api-v1", "api-v2", "apidocs",
    "app", "apps", "app1", "app2", "apollo", "auth", "oauth", "sso", "okta",
    "cas", "login", "logon", "log", "logs", "logging", "backup", "backups",
    "beta", "alpha", "billing", "blog", "blogs", "board", "blackboard",
    "biblioteca", "catalog", "catalogo", "catalogue", "cart", "carro", "cdn",
    "chat", "ci", "cicd", "citrix", "classroom", "clients", "clientes", "cloud",
    "cluster", "connect", "console", "controller", "cp", "cpanel", "correoweb",
    "crm", "customers", "dashboard", "data", "db", "dbs", "database", "demo",
    "dev", "develop", "developer", "developers", "development", "devops",
    "directory", "dmz", "docker", "docs", "documentation", "domain",
    "domaincontroller", "domain-controller", "download", "downloads", "edge",
    "ejemplo", "ejemplos", "enrutador", "events", "eventos", "example",
    "examples", "extranet", "feed", "files", "fileserver", "finance",
    "firewall", "firmware", "foro", "foros", "forum", "forums", "freebsd",
    "ftpd", "galeria", "gallery", "gateway", "git", "gitlab", "github",
    "grafana", "groups", "groupwise", "guest", "guia", "guide", "help",
    "helpdesk", "home", "hotspot", "hr", "images", "imgs", "internal",
    "interno", "intranet", "inmuebles", "ip6", "ipsec", "ipv6", "irc", "ircd",
    "isa", "jabber", "jenkins", "jira", "jupiter", "k8s", "kb", "kibana",
    "kubernetes", "lab", "labs", "laboratory", "laboratories", "laboratorio",
    "ldap", "library", "linux", "live", "localhost", "m", "manager", "manual",
    "marketing", "media", "member", "members", "mercury", "meta", "meta01",
    "meta02", "meta1", "meta2", "metrics", "miembros", "minerva", "mob",
    "mobile", "monitor", "monitoring", "moodle", "movil", "mssql", "my",
    "mysql", "news", "novell", "ntp", "online", "ora", "oracle", "osx", "owa",
    "partners", "pcanywhere", "pegasus", "personal", "photo", "photos",
    "platform", "portal", "postgresql", "postman", "ppp", "pre-prod",
    "preprod", "private", "prod", "production", "proxy", "prueba", "pruebas",
    "pub", "public", "qa", "ras", "redis", "remote", "reports", "research",
    "resources", "restricted", "router", "rtr", "sales", "sample", "samples",
    "sandbox", "search", "secure", "seguro", "server", "services", "servicios",
    "servidor", "sharepoint", "shop", "shopping", "sms", "social", "socios",
    "solaris", "soporte", "sql", "squirrel", "squirrelmail", "ssh", "staff",
    "stage", "staging", "static", "stats", "status", "store", "stream", "sun",
    "support", "test", "testing", "tftp", "tienda", "tunnel", "uat", "unix",
    "updates", "upload", "uploads", "vnc", "ventas", "virtual", "vista", "vpn",
    "vpn1", "vpn2", "vpn3", "wap", "web", "web0", "web01", "web02", "web03",
    "web1", "web2", "web3", "webadmin", "webct", "weblog", "webmaster",
    "webmin", "win", "windows", "wiki", "wordpress", "ww0", "ww01", "ww02",
    "ww03", "ww1", "ww2", "ww3", "www0", "www1", "www2", "www3", "xanthus",
    "zeus", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "n",
    "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "a1", "a2",
    "a3", "a4", "a5", "admin1", "admin2", "admin3", "admin-panel",
    "admin-portal", "admin-dev", "admin-test", "admin-staging", "alpha1",
    "alpha2", "analytics", "analytics1", "analytics2", "akamai", "amazonaws",
    "ap-northeast-cdn", "ap-southeast-cdn", "api-admin", "api-auth",
    "api-console", "api-internal", "api-prod", "api-staging", "app-dev",
    "app-prod", "app-staging", "archive", "archives", "archivos", "assets",
    "aula", "aulas", "ayuda", "bart", "bsd", "bounce", "bounces", "cache",
    "canary", "checkout", "chimera", "chronos", "csg", "dc", "demon",
    "demostration", "descargas", "diana", "dl", "gilford", "hera", "heracles",
    "hercules", "homer", "hypernova", "imap3", "imap3d", "imogen", "legacy",
    "lisa", "mailer", "mirror", "mirrors", "neon", "nelson", "net", "old",
    "origin", "origin1", "origin2", "payments", "payment", "pendrell",
    "preview", "print", "profiles", "prometheus", "ra", "rb", "release",
    "reverse-proxy", "robinhood", "s3", "saml", "signin", "signup", "sip",
    "smtp1", "smtp2", "sso1", "staging1", "staging2", "stun", "svn", "swagger",
    "ticket", "ticketing", "tickets", "track", "tracking", "turn", "upload1",
    "v1", "v2", "video", "voip", "voice", "webhook", "webhooks", "webrtc",
    "xmpp", "zendesk",
];

/// 取内置字典
pub fn get_default_sub_data() -> Vec<&'static str> {
    DEFAULT_SUB_DATA.to_vec()
}
