//! Usage text.

pub const USAGE: &str = "\
prophet - IT asset inventory client

USAGE:
    prophet [--api URL] <command> [args]

SESSION:
    captcha [--out FILE] [--open]           Fetch a login captcha
    login <user> --captcha-id ID --captcha CODE
                                            Log in (password from PROPHET_PASSWORD or prompt)
    register <user> --email EMAIL --captcha-id ID --captcha CODE
    logout
    whoami

INVENTORY:
    hosts [list] [--page N] [--per-page N] [--search TEXT]
    hosts show <id>
    hosts delete <id>...
    hosts collect <id>... [--concurrent N]
    hosts export [<id>] [--format json|yaml] [--out FILE]
    scans [list] [--status S] | show <id> | create <target> --name NAME [--nmap-args ARGS]
    scans cancel <id> | results <id>
    collections [list] | show <id> | cancel <id> | retry <id> | watch <id>
    collections export <id> [--out FILE]
    platforms [list] | test <id> | sync <id>
    tags [list] | create <name> [--color HEX] [--description TEXT] | delete <id>
    tags assign <tag-id> <host-id> | unassign <tag-id> <host-id>
    apps [list] | show <id>
    apps graph get <id> | graph save <id> <file> | graph export <id> [--out FILE]
    import hosts <file.csv>

SETTINGS:
    config get | config set [--scan N] [--collect N]
    locale [toggle|zh-CN|en-US]
    settings page-size [N]
    open <path>                             Check where a page route leads
    version | help

ENVIRONMENT:
    PROPHET_API_URL   backend URL (default http://localhost:5000/api)
    PROPHET_HOME      data directory (default ~/.prophet)
    PROPHET_LOG       log filter (default warn)
";

pub fn handle_help_command() {
    print!("{}", USAGE);
}
