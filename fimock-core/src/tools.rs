/// A simulated financial data endpoint exposed to MCP clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
}

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "fetch_net_worth",
        description: "Calculate comprehensive net worth using actual data from connected assets and liabilities: bank accounts, mutual funds, EPF, stocks and loans.",
    },
    ToolSpec {
        name: "fetch_credit_report",
        description: "Retrieve the credit report including scores, active loans, credit card utilization, payment history and recent inquiries.",
    },
    ToolSpec {
        name: "fetch_epf_details",
        description: "Retrieve Employee Provident Fund account information: balance, employer and employee contributions, and passbook entries.",
    },
    ToolSpec {
        name: "fetch_mf_transactions",
        description: "Retrieve mutual fund transactions for portfolio analysis: purchases, redemptions, SIPs and switches.",
    },
    ToolSpec {
        name: "fetch_bank_transactions",
        description: "Retrieve detailed bank transactions for each connected bank account.",
    },
    ToolSpec {
        name: "fetch_stock_transactions",
        description: "Retrieve Indian stock transactions: buys, sells, bonuses and splits.",
    },
];

/// Look up a tool by name
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("fetch_net_worth").map(|t| t.name), Some("fetch_net_worth"));
        assert!(find("fetch_balance").is_none());
    }
}
