//! Built-in Centrika code tables.

use super::{PartyCategory, PartyGroup, Taxonomy, TaxonomyEntry};

const DEPARTMENTS: &[(&str, &str, &str)] = &[
    // Executive & management
    ("CTK-CEO", "CEO Office", "Chief Executive Office - Strategic leadership and executive decisions"),
    ("CTK-EXEC", "Executive Team", "Executive Team - Senior management and strategic planning"),
    ("CTK-BOARD", "Board of Directors", "Board of Directors - Governance and oversight"),
    // Core business
    ("CTK-FINC", "Finance Department", "Finance Department - Financial management and accounting"),
    ("CTK-TECH", "Technology Department", "Technology Department - IT infrastructure and development"),
    ("CTK-RISK", "Risk Management", "Risk Management - Risk assessment and mitigation"),
    ("CTK-COMP", "Compliance Department", "Compliance Department - Regulatory compliance and legal adherence"),
    ("CTK-PROD", "Product Development", "Product Development - Product design and innovation"),
    ("CTK-CUST", "Customer Operations", "Customer Operations - Customer service and support"),
    ("CTK-LEGAL", "Legal Affairs", "Legal Affairs - Legal counsel and contract management"),
    // Business operations
    ("CTK-MARK", "Marketing Department", "Marketing Department - Brand promotion and market strategy"),
    ("CTK-COMM", "Commercial Department", "Commercial Department - Sales and business development"),
    ("CTK-INTL", "International Division", "International Division - Global operations and expansion"),
    ("CTK-HR", "Human Resources", "Human Resources - Employee management and development"),
    ("CTK-AUDIT", "Internal Audit", "Internal Audit - Internal controls and audit functions"),
    ("CTK-GEN", "General/Cross-Dept", "General/Cross-Dept - Company-wide communications"),
];

const PRODUCTS: &[(&str, &str, &str)] = &[
    ("GWAY", "Payment Gateway", "Transaction processing, merchant issues"),
    ("WALT", "Consumer Wallet", "User accounts, P2P transfers"),
    ("CARD", "B2B Corporate Cards", "Card issuance, expense management"),
    ("CRED", "Credit Solutions", "Loan applications, credit scoring"),
    ("XPAY", "International Transfers", "Remittances, FX transactions"),
    ("KIOSK", "Multi-Service Kiosks", "Physical locations, cash services"),
    ("SFBS", "Transport (SafariBus)", "Bus ticketing, route management"),
    ("EVENT", "Event Ticketing (TiCQet)", "Event sales, venue management"),
    ("COMP", "Compliance/Regulatory", "BNR reporting, audit requirements"),
    ("TECH", "Technology Infrastructure", "System maintenance, security"),
    ("FUND", "Fundraising Activities", "Investor relations, due diligence"),
    ("ALL", "Company-wide/Multiple", "General announcements, multi-product"),
];

const ACTIONS: &[(&str, &str, &str)] = &[
    ("ACTION", "Action Required", "Recipient must complete a task"),
    ("DECISION", "Decision Needed", "Recipient must choose between options"),
    ("REVIEW", "Review Required", "Recipient must review and give feedback"),
    ("APPROVAL", "Approval Required", "Recipient must approve or reject"),
    ("MEETING", "Meeting/Schedule", "Meeting request or scheduling"),
    ("INFO", "Information Only", "No action required"),
];

const URGENCIES: &[(&str, &str, &str)] = &[
    ("URGENT", "Urgent", "Same-day response required"),
    ("HIGH", "High", "Response required within 24 hours"),
    ("LOW", "Low", "Respond when convenient"),
];

const REGULATORY: &[(&str, &str, &str)] = &[
    ("BNR", "Central Bank of Rwanda", "Regulatory authority"),
    ("MINICT", "Ministry of ICT and Innovation", "Government ministry"),
    ("RDB", "Rwanda Development Board", "Development authority"),
    ("RURA", "Rwanda Utilities Regulatory Authority", "Utilities regulator"),
    ("RSB", "Rwanda Standards Board", "Standards authority"),
];

const FINANCIAL: &[(&str, &str, &str)] = &[
    ("BK", "Bank of Kigali", "Partner bank"),
    ("EquityBank", "Equity Bank Rwanda", "Partner bank"),
    ("AccessBank", "Access Bank Rwanda", "Partner bank"),
    ("Unguka", "Unguka Bank", "Partner bank"),
    ("BPR", "Banque Populaire du Rwanda", "Partner bank"),
];

const TECHNOLOGY: &[(&str, &str, &str)] = &[
    ("Microsoft", "Microsoft Corporation", "Technology partner"),
    ("AWS", "Amazon Web Services", "Cloud services"),
    ("Visa", "Visa Inc.", "Payment network"),
    ("Mastercard", "Mastercard", "Payment network"),
    ("UnionPay", "China UnionPay", "Payment network"),
    ("MTN", "MTN Rwanda", "Telecom partner"),
    ("Airtel", "Airtel Rwanda", "Telecom partner"),
];

const COMMON: &[(&str, &str, &str)] = &[
    ("Customer", "Customer", "Individual customer"),
    ("Merchant", "Merchant", "Business merchant"),
    ("Investor", "Investor", "Current or potential investor"),
    ("Partner", "Business Partner", "Strategic partner"),
    ("Vendor", "Vendor", "Service provider"),
    ("Media", "Media Outlet", "Press or media"),
];

fn entries(rows: &[(&str, &str, &str)]) -> Vec<TaxonomyEntry> {
    rows.iter()
        .map(|&(code, name, description)| TaxonomyEntry::new(code, name, description))
        .collect()
}

fn group(category: PartyCategory, rows: &[(&str, &str, &str)]) -> PartyGroup {
    PartyGroup {
        category,
        entries: entries(rows),
    }
}

pub(super) fn centrika() -> Taxonomy {
    Taxonomy {
        departments: entries(DEPARTMENTS),
        products: entries(PRODUCTS),
        actions: entries(ACTIONS),
        urgencies: entries(URGENCIES),
        external_parties: vec![
            group(PartyCategory::Regulatory, REGULATORY),
            group(PartyCategory::Financial, FINANCIAL),
            group(PartyCategory::Technology, TECHNOLOGY),
            group(PartyCategory::Common, COMMON),
        ],
    }
}
