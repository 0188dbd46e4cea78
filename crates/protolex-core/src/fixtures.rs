//! Record fixtures for tests across the workspace.
//!
//! Enabled by the `test-utils` feature (and always in this crate's own
//! tests). [`sample_corpus`] is a small, fully valid catalog whose
//! cross-references all resolve; tests that need broken data start from it
//! and mutate fields.

use crate::{Category, Example, Protocol, Resource};

/// A minimal valid record with statements derived from `id`.
pub fn protocol(id: &str, category: Category) -> Protocol {
    let name = id.to_uppercase();
    Protocol {
        id: id.to_string(),
        name: name.clone(),
        short_description: format!("{name} short description"),
        full_description: format!("{name} full description"),
        category: category.as_str().to_string(),
        difficulty: "Beginner".to_string(),
        advantages: vec![format!("{name} advantage one"), format!("{name} advantage two")],
        disadvantages: vec![format!("{name} drawback one"), format!("{name} drawback two")],
        use_cases: vec![format!("{name} use case one"), format!("{name} use case two")],
        examples: Some(vec![Example {
            title: "Example".to_string(),
            code: format!("{id} --help"),
            explanation: "Shows usage".to_string(),
        }]),
        resources: Some(vec![Resource {
            title: format!("{name} reference"),
            url: format!("https://example.org/{id}"),
            kind: "documentation".to_string(),
        }]),
        ..Default::default()
    }
}

struct Entry<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    difficulty: &'a str,
    port: Option<&'a str>,
    short: &'a str,
    full: &'a str,
    advantages: [&'a str; 2],
    disadvantages: [&'a str; 2],
    use_cases: [&'a str; 2],
    related: &'a [&'a str],
    code: &'a str,
}

impl Entry<'_> {
    fn build(&self) -> Protocol {
        Protocol {
            id: self.id.to_string(),
            name: self.name.to_string(),
            short_description: self.short.to_string(),
            full_description: self.full.to_string(),
            category: self.category.as_str().to_string(),
            difficulty: self.difficulty.to_string(),
            port: self.port.map(String::from),
            advantages: strings(&self.advantages),
            disadvantages: strings(&self.disadvantages),
            use_cases: strings(&self.use_cases),
            examples: Some(vec![Example {
                title: format!("{} in practice", self.name),
                code: self.code.to_string(),
                explanation: format!("A typical {} invocation", self.name),
            }]),
            related_protocols: strings(self.related),
            resources: Some(vec![Resource {
                title: format!("{} specification", self.name),
                url: format!("https://example.org/rfc/{}", self.id),
                kind: "rfc".to_string(),
            }]),
            ..Default::default()
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ten well-formed records whose `relatedProtocols` all resolve.
pub fn sample_corpus() -> Vec<Protocol> {
    let entries = [
        Entry {
            id: "tcp",
            name: "TCP",
            category: Category::Transport,
            difficulty: "Beginner",
            port: None,
            short: "Reliable, ordered, connection-oriented byte stream transport",
            full: "The Transmission Control Protocol provides reliable delivery of a stream of bytes between applications using a three-way handshake, acknowledgements and retransmission.",
            advantages: ["Reliable, ordered delivery", "Built-in congestion control"],
            disadvantages: ["Head-of-line blocking", "Connection setup adds latency"],
            use_cases: ["Web browsing", "File transfer"],
            related: &["udp", "http"],
            code: "nc example.org 80",
        },
        Entry {
            id: "udp",
            name: "UDP",
            category: Category::Transport,
            difficulty: "Beginner",
            port: None,
            short: "Connectionless datagram transport with minimal overhead",
            full: "The User Datagram Protocol sends independent datagrams without handshakes, ordering or retransmission.",
            advantages: ["Very low overhead", "No connection setup delay"],
            disadvantages: ["No delivery guarantee", "No congestion control"],
            use_cases: ["DNS lookups", "Voice and video streaming"],
            related: &["tcp", "dns"],
            code: "nc -u example.org 53",
        },
        Entry {
            id: "http",
            name: "HTTP",
            category: Category::Web,
            difficulty: "Beginner",
            port: Some("80"),
            short: "Request/response protocol of the World Wide Web",
            full: "HTTP is a stateless application protocol where clients send requests with methods such as GET and POST and servers answer with status codes and representations.",
            advantages: ["Simple text-based format", "Universally supported"],
            disadvantages: ["Plaintext without TLS", "Stateless by design"],
            use_cases: ["Serving web pages", "REST APIs"],
            related: &["tcp", "https"],
            code: "curl -v http://example.org/",
        },
        Entry {
            id: "https",
            name: "HTTPS",
            category: Category::Security,
            difficulty: "Intermediate",
            port: Some("443"),
            short: "HTTP over TLS for encrypted web traffic",
            full: "HTTPS layers HTTP on top of TLS, authenticating the server with certificates and resuming sessions with TLS session tickets.",
            advantages: ["Encrypts traffic in transit", "Authenticates the server"],
            disadvantages: ["Certificate management overhead", "Handshake adds latency"],
            use_cases: ["Online banking", "Login forms"],
            related: &["http", "tcp"],
            code: "curl -v https://example.org/",
        },
        Entry {
            id: "kerberos",
            name: "Kerberos",
            category: Category::Security,
            difficulty: "Advanced",
            port: Some("88"),
            short: "Ticket-based network authentication protocol",
            full: "Kerberos authenticates users and services through a trusted key distribution center that issues time-limited tickets, so passwords never cross the network.",
            advantages: ["Single sign-on", "Passwords never sent over the network"],
            disadvantages: [
                "Key distribution center is a single point of failure",
                "Requires synchronized clocks",
            ],
            use_cases: [
                "Active Directory authentication",
                "Single sign-on in enterprise networks",
            ],
            related: &["ldap"],
            code: "kinit alice@EXAMPLE.ORG",
        },
        Entry {
            id: "ldap",
            name: "LDAP",
            category: Category::Infrastructure,
            difficulty: "Intermediate",
            port: Some("389, 636"),
            short: "Directory access protocol for users, groups and devices",
            full: "LDAP queries and modifies hierarchical directory services; binds can use SASL with Kerberos for authentication.",
            advantages: ["Standardized directory access", "Hierarchical data model"],
            disadvantages: ["Complex schema design", "Plaintext binds without TLS"],
            use_cases: ["Centralized user directories", "Address books"],
            related: &["kerberos"],
            code: "ldapsearch -x -b dc=example,dc=org uid=alice",
        },
        Entry {
            id: "dns",
            name: "DNS",
            category: Category::Infrastructure,
            difficulty: "Beginner",
            port: Some("53"),
            short: "Hierarchical name resolution for the internet",
            full: "DNS translates domain names into IP addresses using a distributed hierarchy of authoritative servers and caching resolvers.",
            advantages: ["Distributed and scalable", "Caching reduces load"],
            disadvantages: ["Spoofing without DNSSEC", "Propagation delays"],
            use_cases: ["Resolving domain names", "Email routing with MX records"],
            related: &["udp", "tcp"],
            code: "dig example.org A",
        },
        Entry {
            id: "ssh",
            name: "SSH",
            category: Category::Security,
            difficulty: "Intermediate",
            port: Some("22"),
            short: "Encrypted remote login and command execution",
            full: "SSH provides an encrypted channel for remote shells, file transfer and port forwarding, supporting public keys and Kerberos through GSSAPI.",
            advantages: ["Strong encryption", "Public key authentication"],
            disadvantages: ["Key management at scale", "Port forwarding can bypass firewalls"],
            use_cases: ["Remote server administration", "Secure file transfer"],
            related: &["tcp"],
            code: "ssh -i ~/.ssh/id_ed25519 admin@example.org",
        },
        Entry {
            id: "smtp",
            name: "SMTP",
            category: Category::Email,
            difficulty: "Beginner",
            port: Some("25, 587"),
            short: "Protocol for sending and relaying email",
            full: "SMTP moves messages between mail servers and from clients to submission servers using text commands like HELO, MAIL FROM and RCPT TO.",
            advantages: ["Universal email delivery", "Simple command set"],
            disadvantages: ["Sender spoofing without SPF and DKIM", "Plaintext unless STARTTLS"],
            use_cases: ["Sending email", "Relaying mail between servers"],
            related: &["imap", "dns"],
            code: "swaks --to bob@example.org --server mail.example.org",
        },
        Entry {
            id: "imap",
            name: "IMAP",
            category: Category::Email,
            difficulty: "Intermediate",
            port: Some("143, 993"),
            short: "Protocol for accessing mailboxes on a server",
            full: "IMAP lets clients manage messages that stay on the server, with folders, flags and server-side search.",
            advantages: ["Messages synchronized across devices", "Server-side search"],
            disadvantages: ["Higher server storage use", "More complex than POP3"],
            use_cases: ["Reading email on several devices", "Shared mailboxes"],
            related: &["smtp"],
            code: "openssl s_client -connect mail.example.org:993",
        },
    ];

    entries.iter().map(Entry::build).collect()
}

/// Look up a sample record by id.
///
/// # Panics
///
/// Panics if `id` is not part of [`sample_corpus`].
pub fn sample(id: &str) -> Protocol {
    sample_corpus()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("no sample protocol {id}"))
}
