use std::sync::LazyLock;

use regex::Regex;

const ASN_MIN: u64 = 1;
const ASN_MAX: u64 = 4_294_967_295;
const IPV4_PREFIX_MAX: u8 = 32;
const IPV6_PREFIX_MAX: u8 = 128;

static ASN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:AS)?([0-9]{1,10})$").expect("ASN pattern compiles"));
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .expect("IPv4 pattern compiles")
});
static IPV6_FULL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{0,4}:){1,7}[0-9a-fA-F]{0,4}$").expect("IPv6 pattern compiles")
});
static IPV6_COMPRESSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{0,4}:)*::([0-9a-fA-F]{0,4}:)*[0-9a-fA-F]{0,4}$")
        .expect("IPv6 compressed pattern compiles")
});

/// What a free-form query string looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Asn(u32),
    /// IPv4 address, with or without a prefix length.
    Ipv4,
    /// IPv6 address, with or without a prefix length.
    Ipv6,
    Invalid,
}

/// Stricter classification used by batch mode: a prefix length is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetKind {
    Ipv4Subnet,
    Ipv6Subnet,
    Invalid,
}

type Rule = fn(&str) -> Option<InputKind>;

/// Tried in order; the first rule that decodes the input wins.
const RULES: [Rule; 3] = [decode_asn, decode_ipv4, decode_ipv6];

/// Classify a query string. Total: anything unrecognised is [`InputKind::Invalid`].
pub fn classify(input: &str) -> InputKind {
    RULES
        .iter()
        .find_map(|rule| rule(input))
        .unwrap_or(InputKind::Invalid)
}

/// Classify a string that must be a CIDR subnet (exactly one `/`).
pub fn classify_subnet(input: &str) -> SubnetKind {
    if input.matches('/').count() != 1 {
        return SubnetKind::Invalid;
    }
    if is_valid_ipv4(input) {
        SubnetKind::Ipv4Subnet
    } else if is_valid_ipv6(input) {
        SubnetKind::Ipv6Subnet
    } else {
        SubnetKind::Invalid
    }
}

fn decode_asn(input: &str) -> Option<InputKind> {
    let caps = ASN_RE.captures(input)?;
    let value: u64 = caps[1].parse().ok()?;
    if !(ASN_MIN..=ASN_MAX).contains(&value) {
        return None;
    }
    u32::try_from(value).ok().map(InputKind::Asn)
}

fn decode_ipv4(input: &str) -> Option<InputKind> {
    is_valid_ipv4(input).then_some(InputKind::Ipv4)
}

fn decode_ipv6(input: &str) -> Option<InputKind> {
    is_valid_ipv6(input).then_some(InputKind::Ipv6)
}

fn is_valid_ipv4(input: &str) -> bool {
    let Some((address, prefix)) = split_prefix(input) else {
        return false;
    };
    let Some(caps) = IPV4_RE.captures(address) else {
        return false;
    };
    let octets_ok = (1..=4).all(|i| caps[i].parse::<u16>().is_ok_and(|octet| octet <= 255));
    octets_ok && prefix_within(prefix, IPV4_PREFIX_MAX)
}

fn is_valid_ipv6(input: &str) -> bool {
    let Some((address, prefix)) = split_prefix(input) else {
        return false;
    };
    if !IPV6_FULL_RE.is_match(address) && !IPV6_COMPRESSED_RE.is_match(address) {
        return false;
    }
    prefix_within(prefix, IPV6_PREFIX_MAX)
}

/// Split `addr[/len]`. More than one `/` is rejected.
fn split_prefix(input: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = input.split('/');
    let address = parts.next()?;
    let prefix = parts.next();
    if parts.next().is_some() {
        return None;
    }
    Some((address, prefix))
}

fn prefix_within(prefix: Option<&str>, max: u8) -> bool {
    match prefix {
        None => true,
        Some(len) => {
            !len.is_empty()
                && len.len() <= 3
                && len.bytes().all(|b| b.is_ascii_digit())
                && len.parse::<u8>().is_ok_and(|n| n <= max)
        }
    }
}
