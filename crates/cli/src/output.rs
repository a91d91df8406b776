//! Plain-text rendering of listings and customers.

use std::io::{self, Write};

use clientele_core::{Customer, CustomerListing, page_numbers};

/// Customer table for the current page, followed by the pager line.
pub fn write_listing(out: &mut impl Write, listing: &CustomerListing<'_>) -> io::Result<()> {
    if listing.is_empty() {
        return writeln!(out, "No customers found.");
    }

    writeln!(
        out,
        "{:<8} {:<24} {:<32} {:<16} PRIMARY ADDRESS",
        "ID", "NAME", "EMAIL", "PHONE"
    )?;
    for customer in listing.visible() {
        writeln!(
            out,
            "{:<8} {:<24} {:<32} {:<16} {}",
            customer.id,
            customer.name,
            customer.email,
            customer.phone,
            customer.primary_address_label()
        )?;
    }

    let pages: Vec<String> = page_numbers(listing.total_pages)
        .map(|n| {
            if n == listing.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    writeln!(
        out,
        "Page {} of {} ({} matching)  {}",
        listing.page,
        listing.total_pages,
        listing.matches.len(),
        pages.join(" ")
    )
}

/// One customer with every address; `*` marks the primary one.
pub fn write_customer(out: &mut impl Write, customer: &Customer) -> io::Result<()> {
    writeln!(out, "Customer {}", customer.id)?;
    writeln!(out, "  Name:    {}", customer.name)?;
    writeln!(out, "  Email:   {}", customer.email)?;
    writeln!(out, "  Phone:   {}", customer.phone)?;
    writeln!(out, "  Primary: {}", customer.primary_address_label())?;

    if customer.addresses.is_empty() {
        return writeln!(out, "  No addresses.");
    }

    writeln!(out, "  Addresses:")?;
    for address in &customer.addresses {
        let mark = if address.is_primary { '*' } else { ' ' };
        writeln!(
            out,
            "  {mark} {} ({}): {}",
            address.name, address.id, address.full_address
        )?;
    }
    Ok(())
}
